use crate::domain::Volunteer;

/// Case-insensitive substring match over name, email and address. Each match
/// keeps its position in `records`.
pub fn filter_volunteers<'a>(records: &'a [Volunteer], query: &str) -> Vec<(usize, &'a Volunteer)> {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, volunteer)| needle.is_empty() || matches(volunteer, &needle))
        .collect()
}

fn matches(volunteer: &Volunteer, needle: &str) -> bool {
    [&volunteer.name, &volunteer.email, &volunteer.address]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
