//! Response headers: entity alerts and pagination.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use engine::{ENTITY_NAME, PageRequest};

const APPLICATION_NAME: &str = "paymentsApp";

pub(crate) static ALERT_HEADER: HeaderName = HeaderName::from_static("x-payments-alert");
pub(crate) static ERROR_HEADER: HeaderName = HeaderName::from_static("x-payments-error");
pub(crate) static PARAMS_HEADER: HeaderName = HeaderName::from_static("x-payments-params");
pub(crate) static TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Inserts `value`, skipping values that are not valid header text.
pub(crate) fn insert(headers: &mut HeaderMap, name: &HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name.clone(), value);
        }
        Err(_) => tracing::error!("failed to encode {name} header"),
    }
}

/// Alert for a created/updated entity, e.g. `paymentsApp.transaction.created`.
pub(crate) fn entity_alert(action: &str, id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(
        &mut headers,
        &ALERT_HEADER,
        &format!("{APPLICATION_NAME}.{ENTITY_NAME}.{action}"),
    );
    insert(&mut headers, &PARAMS_HEADER, id);
    headers
}

fn page_link(base_path: &str, page: u64, size: u64, rel: &str) -> String {
    format!("<{base_path}?page={page}&size={size}>; rel=\"{rel}\"")
}

/// `X-Total-Count` and an RFC 5988 `Link` header with `next`, `prev`,
/// `last` and `first` relations.
pub(crate) fn pagination(base_path: &str, page: PageRequest, total: u64) -> HeaderMap {
    let size = page.size.max(1);
    let total_pages = total.div_ceil(size);
    let last_page = total_pages.saturating_sub(1);

    let mut links = Vec::with_capacity(4);
    if let Some(next) = page.page.checked_add(1).filter(|next| *next < total_pages) {
        links.push(page_link(base_path, next, size, "next"));
    }
    if let Some(prev) = page.page.checked_sub(1) {
        links.push(page_link(base_path, prev, size, "prev"));
    }
    links.push(page_link(base_path, last_page, size, "last"));
    links.push(page_link(base_path, 0, size, "first"));

    let mut headers = HeaderMap::new();
    insert(&mut headers, &TOTAL_COUNT_HEADER, &total.to_string());
    insert(&mut headers, &axum::http::header::LINK, &links.join(","));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(headers: &HeaderMap) -> &str {
        headers
            .get(axum::http::header::LINK)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[test]
    fn middle_page_links_both_ways() {
        let headers = pagination("/api/transactions", PageRequest::new(1, 10), 35);
        assert_eq!(
            link(&headers),
            "</api/transactions?page=2&size=10>; rel=\"next\",\
             </api/transactions?page=0&size=10>; rel=\"prev\",\
             </api/transactions?page=3&size=10>; rel=\"last\",\
             </api/transactions?page=0&size=10>; rel=\"first\""
        );
        assert_eq!(
            headers.get(&TOTAL_COUNT_HEADER).and_then(|v| v.to_str().ok()),
            Some("35")
        );
    }

    #[test]
    fn last_representable_page_has_no_next() {
        let headers = pagination("/api/transactions", PageRequest::new(u64::MAX, 20), 3);
        let link = link(&headers);
        assert!(!link.contains("rel=\"next\""));
        assert!(link.contains(&format!("page={}&size=20>; rel=\"prev\"", u64::MAX - 1)));
        assert!(link.contains("</api/transactions?page=0&size=20>; rel=\"last\""));
    }

    #[test]
    fn empty_listing_still_has_first_and_last() {
        let headers = pagination("/api/transactions", PageRequest::new(0, 20), 0);
        assert_eq!(
            link(&headers),
            "</api/transactions?page=0&size=20>; rel=\"last\",\
             </api/transactions?page=0&size=20>; rel=\"first\""
        );
    }

    #[test]
    fn entity_alert_names_action_and_id() {
        let headers = entity_alert("created", "abc");
        assert_eq!(
            headers.get(&ALERT_HEADER).and_then(|v| v.to_str().ok()),
            Some("paymentsApp.transaction.created")
        );
        assert_eq!(
            headers.get(&PARAMS_HEADER).and_then(|v| v.to_str().ok()),
            Some("abc")
        );
    }
}
