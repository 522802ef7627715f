use crate::models::ServiceCenter;

/// Service centers whose city, name or state contains `search`
/// (case-insensitive), in source order. An empty search returns every center.
pub fn find_service_centers<'a>(
    centers: &'a [ServiceCenter],
    search: &str,
) -> Vec<&'a ServiceCenter> {
    let needle = search.to_lowercase();
    centers
        .iter()
        .filter(|center| {
            center.city.to_lowercase().contains(&needle)
                || center.name.to_lowercase().contains(&needle)
                || center.state.to_lowercase().contains(&needle)
        })
        .collect()
}
