// Date ordering with undated entries deferred to the end

/// Placeholder for undated items in a descending sort
pub const DESCENDING_SENTINEL: &str = "1900-01-01";
/// Placeholder for undated items in an ascending sort
pub const ASCENDING_SENTINEL: &str = "2999-01-01";

/// Stable sort on an ISO date field
///
/// Items whose key is missing or empty get a sentinel written into the key so
/// they sort after every dated item in either direction. Items with equal
/// keys keep their input order.
pub fn sort_by_date_key<T, F>(mut items: Vec<T>, mut key: F, descending: bool) -> Vec<T>
where
    F: FnMut(&mut T) -> &mut Option<String>,
{
    let sentinel = if descending { DESCENDING_SENTINEL } else { ASCENDING_SENTINEL };

    for item in items.iter_mut() {
        let date = key(item);
        if date.as_deref().map_or(true, str::is_empty) {
            *date = Some(sentinel.to_string());
        }
    }

    let mut keyed: Vec<(String, T)> = items
        .into_iter()
        .map(|mut item| (key(&mut item).clone().unwrap_or_default(), item))
        .collect();

    if descending {
        keyed.sort_by(|a, b| b.0.cmp(&a.0));
    } else {
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
    }

    keyed.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Dated {
        id: u32,
        date: Option<String>,
    }

    fn dated(id: u32, date: Option<&str>) -> Dated {
        Dated { id, date: date.map(str::to_string) }
    }

    fn ids(items: &[Dated]) -> Vec<u32> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_descending_defers_undated() {
        let items = vec![
            dated(1, None),
            dated(2, Some("2021-10-22")),
            dated(3, Some("")),
            dated(4, Some("1984-12-14")),
        ];
        let sorted = sort_by_date_key(items, |i| &mut i.date, true);
        assert_eq!(ids(&sorted), vec![2, 4, 1, 3]);
        assert_eq!(sorted[2].date.as_deref(), Some(DESCENDING_SENTINEL));
        assert_eq!(sorted[3].date.as_deref(), Some(DESCENDING_SENTINEL));
    }

    #[test]
    fn test_ascending_defers_undated() {
        let items = vec![dated(1, None), dated(2, Some("2021-10-22")), dated(3, Some("1984-12-14"))];
        let sorted = sort_by_date_key(items, |i| &mut i.date, false);
        assert_eq!(ids(&sorted), vec![3, 2, 1]);
        assert_eq!(sorted[2].date.as_deref(), Some(ASCENDING_SENTINEL));
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let items = vec![
            dated(1, Some("2000-01-01")),
            dated(2, Some("2010-01-01")),
            dated(3, Some("2000-01-01")),
        ];
        assert_eq!(ids(&sort_by_date_key(items.clone(), |i| &mut i.date, true)), vec![2, 1, 3]);
        assert_eq!(ids(&sort_by_date_key(items, |i| &mut i.date, false)), vec![1, 3, 2]);
    }

    #[test]
    fn test_empty_input() {
        let sorted: Vec<Dated> = sort_by_date_key(Vec::new(), |i| &mut i.date, true);
        assert!(sorted.is_empty());
    }
}
