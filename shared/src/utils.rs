/// Renders the first run of 11 digits as `+D (DDD) DDD-DDDD`; anything else is returned as is.
pub fn format_phone(phone: &str) -> String {
    let chars = phone.char_indices().collect::<Vec<_>>();
    let mut run = 0;
    for (ind, (_, ch)) in chars.iter().enumerate() {
        if !ch.is_ascii_digit() {
            run = 0;
            continue;
        }
        run += 1;
        if run == 11 {
            let start = chars[ind + 1 - 11].0;
            let end = chars[ind].0 + 1;
            let d = &phone[start..end];
            return format!(
                "{}+{} ({}) {}-{}{}",
                &phone[..start],
                &d[0..1],
                &d[1..4],
                &d[4..7],
                &d[7..11],
                &phone[end..]
            );
        }
    }
    phone.to_string()
}

pub fn page_count(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// `"a, b,,c"` -> `["a", "b", "c"]`
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// `?q=<search>&page=<page>&limit=<limit>` with the search text encoded.
pub fn page_query(search: &str, page: u64, limit: u64) -> String {
    format!("?q={}&page={page}&limit={limit}", urlencoding::encode(search))
}

/// Server-provided value usable as a CSS class. Whitespace runs become `-`;
/// `None` when nothing is left.
pub fn class_token(value: &str) -> Option<String> {
    let token = value.split_whitespace().collect::<Vec<_>>().join("-");
    if token.is_empty() { None } else { Some(token) }
}

pub fn money(value: Option<f64>) -> String {
    format!("${:.4}", value.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_formatting() {
        assert_eq!(format_phone("15551234567"), "+1 (555) 123-4567");
        assert_eq!(format_phone("tel:15551234567x"), "tel:+1 (555) 123-4567x");
        assert_eq!(format_phone("12345"), "12345");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn pages() {
        assert_eq!(page_count(0, 20), 0);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
    }

    #[test]
    fn comma_lists() {
        assert_eq!(split_list(" vip, beta,, "), vec!["vip", "beta"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn search_query_is_encoded() {
        assert_eq!(page_query("", 1, 20), "?q=&page=1&limit=20");
        assert_eq!(page_query("ann & bob", 3, 20), "?q=ann%20%26%20bob&page=3&limit=20");
    }

    #[test]
    fn class_tokens() {
        assert_eq!(class_token("running").as_deref(), Some("running"));
        assert_eq!(class_token(" in  review ").as_deref(), Some("in-review"));
        assert_eq!(class_token(" \t"), None);
        assert_eq!(class_token(""), None);
    }

    #[test]
    fn money_has_four_decimals() {
        assert_eq!(money(Some(0.0125)), "$0.0125");
        assert_eq!(money(None), "$0.0000");
    }
}
