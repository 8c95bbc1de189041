//! `?years=2024,2021` query value <-> selected years.

/// Years named in a `years` query value that have data, in query order, without duplicates.
pub fn parse_years_query(query: &str, available: &[i32]) -> Vec<i32> {
    let mut years = Vec::new();
    for year in query.split(',').filter_map(|s| s.trim().parse::<i32>().ok()) {
        if available.contains(&year) && !years.contains(&year) {
            years.push(year);
        }
    }
    years
}

/// Query value for a selection; `None` means the parameter should be removed.
pub fn format_years_query(years: &[i32]) -> Option<String> {
    if years.is_empty() {
        return None;
    }
    Some(
        years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Selection on first load: the query's years, or the most recent year with data.
pub fn initial_selection(query: Option<&str>, available: &[i32]) -> Vec<i32> {
    let selected = query
        .map(|q| parse_years_query(q, available))
        .unwrap_or_default();
    if !selected.is_empty() {
        return selected;
    }
    available.iter().max().map(|y| vec![*y]).unwrap_or_default()
}
