use crate::core::pricing::format_inr;
use crate::domain::model::{Offering, OfferingPatch, SellerComponent};
use crate::utils::error::{Result, SellerError};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComponentFilter {
    #[default]
    All,
    Only(SellerComponent),
}

impl ComponentFilter {
    pub fn matches(&self, component: SellerComponent) -> bool {
        match self {
            ComponentFilter::All => true,
            ComponentFilter::Only(wanted) => *wanted == component,
        }
    }
}

impl FromStr for ComponentFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(ComponentFilter::All)
        } else {
            s.parse().map(ComponentFilter::Only)
        }
    }
}

impl fmt::Display for ComponentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentFilter::All => f.write_str("All"),
            ComponentFilter::Only(component) => write!(f, "{}", component),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub query: String,
    pub component: ComponentFilter,
    pub only_available: bool,
}

impl CatalogFilter {
    pub fn clear(&mut self) {
        *self = CatalogFilter::default();
    }

    pub fn matches(&self, offering: &Offering) -> bool {
        self.matches_needle(&self.needle(), offering)
    }

    fn needle(&self) -> String {
        self.query.trim().to_lowercase()
    }

    /// `needle` is the trimmed, lowercased query.
    fn matches_needle(&self, needle: &str, offering: &Offering) -> bool {
        let text_hit = needle.is_empty()
            || offering.title.to_lowercase().contains(needle)
            || offering.location.to_lowercase().contains(needle)
            || offering.component.as_str().to_lowercase().contains(needle);
        text_hit
            && self.component.matches(offering.component)
            && (!self.only_available || offering.available)
    }
}

/// Matching offerings in input order.
pub fn filter_offerings<'a>(offerings: &'a [Offering], filter: &CatalogFilter) -> Vec<&'a Offering> {
    let needle = filter.needle();
    offerings
        .iter()
        .filter(|o| filter.matches_needle(&needle, o))
        .collect()
}

/// One line of the offerings listing.
pub fn offering_row(offering: &Offering) -> String {
    format!(
        "{:<10} {:<20} {:<40} {:<12} {:>6}-{:<6} kWh {:>8}/kWh {}",
        offering.id,
        offering.component.label(),
        offering.title,
        offering.location,
        offering.min_kwh,
        offering.max_kwh,
        format_inr(offering.price_per_kwh),
        if offering.available { "available" } else { "unavailable" }
    )
}

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `off-` followed by six base-36 characters.
pub fn new_offering_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("off-{}", suffix)
}

/// The seller's offerings, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    offerings: Vec<Offering>,
}

impl Catalog {
    pub fn new(offerings: Vec<Offering>) -> Self {
        Self { offerings }
    }

    pub fn from_json(data: &[u8]) -> Result<Self> {
        let offerings: Vec<Offering> = serde_json::from_slice(data)?;
        Ok(Self::new(offerings))
    }

    /// Fresh block with the default shape, inserted at the front.
    pub fn add(&mut self, location: &str) -> &Offering {
        let location = if location.trim().is_empty() {
            "Bengaluru"
        } else {
            location
        };

        let mut id = new_offering_id();
        while self.get(&id).is_some() {
            id = new_offering_id();
        }

        let offering = Offering {
            id,
            component: SellerComponent::Vpp,
            title: "New Energy Block".to_string(),
            location: location.to_string(),
            available: true,
            min_kwh: 5.0,
            max_kwh: 100.0,
            price_per_kwh: 12.0,
            rating: None,
            tags: None,
        };
        tracing::debug!("Adding offering {}", offering.id);
        self.offerings.insert(0, offering);
        &self.offerings[0]
    }

    pub fn remove(&mut self, id: &str) -> Result<Offering> {
        let index = self
            .offerings
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| SellerError::OfferingNotFound { id: id.to_string() })?;
        tracing::debug!("Removing offering {}", id);
        Ok(self.offerings.remove(index))
    }

    pub fn update(&mut self, id: &str, patch: OfferingPatch) -> Result<&Offering> {
        let offering = self
            .offerings
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| SellerError::OfferingNotFound { id: id.to_string() })?;
        offering.apply(patch);
        Ok(&*offering)
    }

    pub fn get(&self, id: &str) -> Option<&Offering> {
        self.offerings.iter().find(|o| o.id == id)
    }

    pub fn first(&self) -> Option<&Offering> {
        self.offerings.first()
    }

    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Offering> {
        filter_offerings(&self.offerings, filter)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Offering> {
        self.offerings.iter()
    }

    pub fn as_slice(&self) -> &[Offering] {
        &self.offerings
    }

    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults::initial_offerings;

    fn ids(offerings: &[&Offering]) -> Vec<String> {
        offerings.iter().map(|o| o.id.clone()).collect()
    }

    fn assert_every_match_satisfies(filter: &CatalogFilter) {
        let all = initial_offerings();
        let hits = filter_offerings(&all, filter);
        let needle = filter.query.trim().to_lowercase();
        for hit in &hits {
            assert!(all.contains(hit));
            assert!(
                needle.is_empty()
                    || hit.title.to_lowercase().contains(&needle)
                    || hit.location.to_lowercase().contains(&needle)
                    || hit.component.as_str().to_lowercase().contains(&needle)
            );
            assert!(filter.component.matches(hit.component));
            assert!(!filter.only_available || hit.available);
        }
        // misses fail at least one predicate
        for offering in all.iter().filter(|o| !hits.contains(o)) {
            assert!(!filter.matches(offering));
        }
    }

    #[test]
    fn test_offering_row_uses_display_label() {
        let all = initial_offerings();
        let row = offering_row(&all[2]);
        assert!(row.starts_with("off-003"));
        assert!(row.contains("EV Charger (DC)"));
        assert!(row.contains("₹14/kWh"));
        assert!(row.ends_with("unavailable"));
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let all = initial_offerings();
        let hits = filter_offerings(&all, &CatalogFilter::default());
        assert_eq!(
            ids(&hits),
            vec!["off-001", "off-002", "off-003", "off-004", "off-005"]
        );
    }

    #[test]
    fn test_query_matches_title_location_and_component() {
        let all = initial_offerings();

        let by_location = CatalogFilter {
            query: "  bengaluru ".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_offerings(&all, &by_location)), vec!["off-001", "off-005"]);

        let by_title = CatalogFilter {
            query: "SOLAR".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_offerings(&all, &by_title)), vec!["off-002"]);

        let by_component = CatalogFilter {
            query: "charger".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_offerings(&all, &by_component)), vec!["off-003", "off-004"]);
    }

    #[test]
    fn test_component_and_availability_filters() {
        let all = initial_offerings();

        let dc_only = CatalogFilter {
            component: ComponentFilter::Only(SellerComponent::DcCharger),
            ..Default::default()
        };
        assert_eq!(ids(&filter_offerings(&all, &dc_only)), vec!["off-003"]);

        let dc_available = CatalogFilter {
            only_available: true,
            ..dc_only.clone()
        };
        assert!(filter_offerings(&all, &dc_available).is_empty());

        let available = CatalogFilter {
            only_available: true,
            ..Default::default()
        };
        assert_eq!(filter_offerings(&all, &available).len(), 4);
    }

    #[test]
    fn test_filter_results_satisfy_all_predicates() {
        let queries = ["", "vpp", "bengaluru", "block", "x"];
        let components = [
            ComponentFilter::All,
            ComponentFilter::Only(SellerComponent::Vpp),
            ComponentFilter::Only(SellerComponent::BatteryStorage),
        ];
        for query in queries {
            for component in components {
                for only_available in [false, true] {
                    assert_every_match_satisfies(&CatalogFilter {
                        query: query.to_string(),
                        component,
                        only_available,
                    });
                }
            }
        }
    }

    #[test]
    fn test_clear_resets_filter() {
        let mut filter = CatalogFilter {
            query: "kochi".to_string(),
            component: ComponentFilter::Only(SellerComponent::DcCharger),
            only_available: true,
        };
        filter.clear();
        assert_eq!(filter, CatalogFilter::default());
    }

    #[test]
    fn test_component_filter_parsing() {
        assert_eq!("All".parse::<ComponentFilter>(), Ok(ComponentFilter::All));
        assert_eq!(
            "micro-grid".parse::<ComponentFilter>(),
            Ok(ComponentFilter::Only(SellerComponent::MicroGrid))
        );
        assert!("hydro".parse::<ComponentFilter>().is_err());
    }

    #[test]
    fn test_new_offering_id_shape() {
        let id = new_offering_id();
        assert!(id.starts_with("off-"));
        assert_eq!(id.len(), 10);
        assert!(id[4..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_add_inserts_at_front() {
        let mut catalog = Catalog::new(initial_offerings());
        let id = catalog.add("Kochi").id.clone();

        assert_eq!(catalog.len(), 6);
        let first = catalog.first().unwrap();
        assert_eq!(first.id, id);
        assert_eq!(first.title, "New Energy Block");
        assert_eq!(first.location, "Kochi");
        assert_eq!((first.min_kwh, first.max_kwh), (5.0, 100.0));
        assert_eq!(first.price_per_kwh, 12.0);

        let fallback = catalog.add("").location.clone();
        assert_eq!(fallback, "Bengaluru");
    }

    #[test]
    fn test_update_and_remove() {
        let mut catalog = Catalog::new(initial_offerings());
        let updated = catalog
            .update(
                "off-003",
                OfferingPatch {
                    available: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(updated.available);

        let removed = catalog.remove("off-003").unwrap();
        assert_eq!(removed.id, "off-003");
        assert!(catalog.get("off-003").is_none());
        assert!(matches!(
            catalog.remove("off-003"),
            Err(SellerError::OfferingNotFound { .. })
        ));
        assert!(catalog
            .update("missing", OfferingPatch::default())
            .is_err());
    }
}
