use crate::catalog::PlaceCatalog;
use crate::constants::MIN_COMBO_SIZE;
use crate::error::{AppError, Result};
use crate::models::PlaceCategory;

/// One candidate itinerary before routing: café, restaurant, attractions,
/// always terminated by the fixed anchor destination.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCombination {
    /// Non-anchor stops in generation order.
    pub stops: Vec<String>,
    /// The festival destination every combination must end at.
    pub anchor: String,
}

impl PlaceCombination {
    /// All place names in input order, anchor last.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stops
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.anchor.as_str()))
    }
}

/// Enumerate candidate combinations: one café, one restaurant, and every
/// unordered selection of `combo_size - 2` attractions, each drawn from the
/// region's top `pool_size` places per category. Thin categories just yield
/// fewer combinations.
pub fn generate_combinations(
    catalog: &PlaceCatalog,
    region: &str,
    anchor: &str,
    combo_size: usize,
    pool_size: usize,
) -> Result<Vec<PlaceCombination>> {
    if combo_size < MIN_COMBO_SIZE {
        return Err(AppError::InvalidComboSize(combo_size));
    }

    let cafes = top_names(catalog, region, PlaceCategory::Cafe, pool_size);
    let restaurants = top_names(catalog, region, PlaceCategory::Restaurant, pool_size);
    let attractions = top_names(catalog, region, PlaceCategory::Attraction, pool_size);

    let attraction_subsets = unordered_subsets(&attractions, combo_size - MIN_COMBO_SIZE);

    let mut combinations =
        Vec::with_capacity(cafes.len() * restaurants.len() * attraction_subsets.len());
    for cafe in &cafes {
        for restaurant in &restaurants {
            for subset in &attraction_subsets {
                let mut stops = Vec::with_capacity(combo_size);
                stops.push(cafe.clone());
                stops.push(restaurant.clone());
                stops.extend(subset.iter().cloned());
                combinations.push(PlaceCombination {
                    stops,
                    anchor: anchor.to_string(),
                });
            }
        }
    }

    tracing::debug!(
        cafes = cafes.len(),
        restaurants = restaurants.len(),
        attractions = attractions.len(),
        combinations = combinations.len(),
        "Generated {} place combinations for region {}",
        combinations.len(),
        region
    );
    Ok(combinations)
}

fn top_names(
    catalog: &PlaceCatalog,
    region: &str,
    category: PlaceCategory,
    k: usize,
) -> Vec<String> {
    catalog
        .filtered_top(region, category, k)
        .into_iter()
        .map(|record| record.name.clone())
        .collect()
}

/// Every unordered selection of `r` items from `pool`, distinct by content.
/// Emitted in lexicographic index order for deterministic batches.
fn unordered_subsets(pool: &[String], r: usize) -> Vec<Vec<String>> {
    let n = pool.len();
    if r == 0 {
        return vec![Vec::new()];
    }
    if r > n {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut indices: Vec<usize> = (0..r).collect();
    loop {
        result.push(indices.iter().map(|&i| pool[i].clone()).collect());

        // Advance the rightmost index that has room to grow.
        let mut pos = r;
        let mut advanced = false;
        while pos > 0 {
            pos -= 1;
            if indices[pos] != pos + n - r {
                advanced = true;
                break;
            }
        }
        if !advanced {
            break;
        }
        indices[pos] += 1;
        for later in pos + 1..r {
            indices[later] = indices[later - 1] + 1;
        }
    }
    result
}
