// Client-side filters over already-fetched dashboard collections
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::asset::WarrantyAsset;
use super::maintenance::{MaintenanceOverviewItem, MaintenanceStatus};

/// Distinct, non-empty key values in order of first appearance.
pub fn available_values<'a, T, F>(items: &'a [T], key: F) -> impl Iterator<Item = &'a str> + 'a
where
    F: Fn(&'a T) -> Option<&'a str> + 'a,
{
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(move |item| key(item))
        .filter(|value| !value.is_empty())
        .filter(move |value| seen.insert(*value))
}

/// Items whose key is in `selected`. An empty selection means no filter.
pub fn apply<'a, T, F>(items: &'a [T], selected: &'a BTreeSet<String>, key: F) -> impl Iterator<Item = &'a T> + 'a
where
    F: Fn(&'a T) -> Option<&'a str> + 'a,
{
    items.iter().filter(move |item| {
        selected.is_empty() || key(*item).is_some_and(|value| selected.contains(value))
    })
}

/// Adds `value` when absent, removes it when present.
pub fn toggle<V: Ord>(selected: &mut BTreeSet<V>, value: V) {
    if !selected.remove(&value) {
        selected.insert(value);
    }
}

fn warranty_type(asset: &WarrantyAsset) -> Option<&str> {
    asset.tipo_activo.as_deref()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WarrantyFilter {
    pub types: BTreeSet<String>,
}

impl WarrantyFilter {
    pub fn toggle_type(&mut self, value: impl Into<String>) {
        toggle(&mut self.types, value.into());
    }

    pub fn clear(&mut self) {
        self.types.clear();
    }

    pub fn available_types<'a>(&self, assets: &'a [WarrantyAsset]) -> Vec<&'a str> {
        available_values(assets, warranty_type).collect()
    }

    pub fn apply<'a>(&'a self, assets: &'a [WarrantyAsset]) -> Vec<&'a WarrantyAsset> {
        apply(assets, &self.types, warranty_type).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceDimension {
    Region,
    Type,
    Status,
}

impl MaintenanceDimension {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "region" => Some(MaintenanceDimension::Region),
            "type" | "tipo" => Some(MaintenanceDimension::Type),
            "status" => Some(MaintenanceDimension::Status),
            _ => None,
        }
    }
}

/// Region, type and status predicates ANDed together. Status starts out
/// holding every value since the overview is not pre-scoped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceFilter {
    pub regions: BTreeSet<String>,
    pub types: BTreeSet<String>,
    pub statuses: BTreeSet<MaintenanceStatus>,
}

impl Default for MaintenanceFilter {
    fn default() -> Self {
        Self {
            regions: BTreeSet::new(),
            types: BTreeSet::new(),
            statuses: MaintenanceStatus::ALL.into_iter().collect(),
        }
    }
}

impl MaintenanceFilter {
    /// Returns false when a status value is not recognized.
    pub fn toggle(&mut self, dimension: MaintenanceDimension, value: &str) -> bool {
        match dimension {
            MaintenanceDimension::Region => toggle(&mut self.regions, value.to_string()),
            MaintenanceDimension::Type => toggle(&mut self.types, value.to_string()),
            MaintenanceDimension::Status => match MaintenanceStatus::parse(value) {
                Some(status) => toggle(&mut self.statuses, status),
                None => return false,
            },
        }
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, item: &MaintenanceOverviewItem) -> bool {
        let in_set = |selected: &BTreeSet<String>, value: Option<&str>| {
            selected.is_empty() || value.is_some_and(|v| selected.contains(v))
        };

        in_set(&self.regions, item.region.as_deref())
            && in_set(&self.types, item.tipo.as_deref())
            && (self.statuses.is_empty() || self.statuses.contains(&item.status))
    }

    pub fn apply<'a>(&self, items: &'a [MaintenanceOverviewItem]) -> Vec<&'a MaintenanceOverviewItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }

    pub fn available_regions<'a>(&self, items: &'a [MaintenanceOverviewItem]) -> Vec<&'a str> {
        available_values(items, |item| item.region.as_deref()).collect()
    }

    pub fn available_types<'a>(&self, items: &'a [MaintenanceOverviewItem]) -> Vec<&'a str> {
        available_values(items, |item| item.tipo.as_deref()).collect()
    }
}

/// Items per status, every status present even when zero.
pub fn status_counts<'a, I>(items: I) -> BTreeMap<MaintenanceStatus, usize>
where
    I: IntoIterator<Item = &'a MaintenanceOverviewItem>,
{
    let mut counts: BTreeMap<MaintenanceStatus, usize> =
        MaintenanceStatus::ALL.into_iter().map(|s| (s, 0)).collect();
    for item in items {
        *counts.entry(item.status).or_default() += 1;
    }
    counts
}
