//! Navigation hand-offs: the search results page and the detail page.

use crate::model::types::RecordId;

pub const DEFAULT_SEARCH_PAGE: &str = "menubusca.html";
pub const DEFAULT_DETAIL_PAGE: &str = "detalhe.html";

/// URL that submits `raw` as a free-text search, or `None` when the
/// trimmed term is empty.
pub fn search_url(page: &str, raw: &str) -> Option<String> {
    let term = raw.trim();
    if term.is_empty() {
        return None;
    }
    Some(format!("{page}?q={}", urlencoding::encode(term)))
}

/// URL of the detail page for a record id.
pub fn detail_url(page: &str, id: &RecordId) -> String {
    format!("{page}?id={}", urlencoding::encode(&id.as_text()))
}

/// Initial search term carried by a query string (`?q=...`).
///
/// `+` decodes to a space, as in HTML form encoding. Invalid percent
/// escapes fall back to the raw value.
pub fn initial_search(query_string: &str) -> Option<String> {
    query_string
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == "q")
        .map(|(_, value)| {
            let spaced = value.replace('+', " ");
            urlencoding::decode(&spaced)
                .map(|s| s.into_owned())
                .unwrap_or(spaced)
        })
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_trims_and_encodes() {
        assert_eq!(
            search_url(DEFAULT_SEARCH_PAGE, "  ciência de dados "),
            Some("menubusca.html?q=ci%C3%AAncia%20de%20dados".to_string())
        );
    }

    #[test]
    fn blank_search_has_no_url() {
        assert_eq!(search_url(DEFAULT_SEARCH_PAGE, "   "), None);
    }

    #[test]
    fn detail_url_encodes_ids() {
        assert_eq!(
            detail_url(DEFAULT_DETAIL_PAGE, &RecordId::Text("BR 10/2020".into())),
            "detalhe.html?id=BR%2010%2F2020"
        );
        assert_eq!(
            detail_url(DEFAULT_DETAIL_PAGE, &RecordId::Number(7.into())),
            "detalhe.html?id=7"
        );
    }

    #[test]
    fn initial_search_reads_q_parameter() {
        assert_eq!(
            initial_search("?tab=x&q=energia+solar%C3%A9"),
            Some("energia solaré".to_string())
        );
        assert_eq!(initial_search("q="), None);
        assert_eq!(initial_search("tab=patentes"), None);
    }

    #[test]
    fn search_url_round_trips_through_initial_search() {
        let url = search_url(DEFAULT_SEARCH_PAGE, "Área Útil").unwrap();
        let query = url.split_once('?').map(|(_, q)| q).unwrap();
        assert_eq!(initial_search(query), Some("Área Útil".to_string()));
    }
}
