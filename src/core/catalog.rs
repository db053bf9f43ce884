use crate::models::{Category, Disposal, Partner};
use std::collections::HashMap;

const NO_ADVICE: &str = "No advice available for this category.";

/// Static lookup tables from classifier labels to disposal information
///
/// Resolution is two-stage:
/// 1. raw label -> `Category` (case-insensitive, surrounding whitespace ignored)
/// 2. `Category` -> partner and advice
///
/// Partners are keyed by category rather than by raw label, so the classifier
/// can rename or add labels without touching partner data. Every miss falls
/// back to a sentinel instead of failing.
#[derive(Debug, Clone)]
pub struct DisposalCatalog {
    categories: HashMap<String, Category>,
    partners: HashMap<Category, Partner>,
    advice: HashMap<Category, String>,
}

impl DisposalCatalog {
    /// Build a catalog from explicit tables. Label keys are normalized.
    pub fn new(
        categories: impl IntoIterator<Item = (String, Category)>,
        partners: HashMap<Category, Partner>,
        advice: HashMap<Category, String>,
    ) -> Self {
        let categories = categories
            .into_iter()
            .map(|(label, category)| (normalize_label(&label), category))
            .collect();

        Self {
            categories,
            partners,
            advice,
        }
    }

    /// Category for a raw classifier label
    pub fn category_for(&self, label: &str) -> Category {
        self.categories
            .get(&normalize_label(label))
            .copied()
            .unwrap_or(Category::Unknown)
    }

    pub fn partner_for(&self, category: Category) -> Partner {
        self.partners
            .get(&category)
            .cloned()
            .unwrap_or_else(Partner::unknown)
    }

    pub fn advice_for(&self, category: Category) -> &str {
        self.advice
            .get(&category)
            .map(String::as_str)
            .unwrap_or(NO_ADVICE)
    }

    /// Resolve a raw label to its full disposal record
    pub fn resolve(&self, label: &str) -> Disposal {
        let category = self.category_for(label);
        Disposal {
            category,
            partner: self.partner_for(category),
            advice: self.advice_for(category).to_string(),
        }
    }

    pub fn label_count(&self) -> usize {
        self.categories.len()
    }
}

impl Default for DisposalCatalog {
    fn default() -> Self {
        let categories = [
            ("cardboard", Category::Recyclable),
            ("paper", Category::Recyclable),
            ("plastic", Category::Recyclable),
            ("glass", Category::Recyclable),
            ("metal", Category::Recyclable),
            ("trash", Category::NonRecyclable),
            ("shoes", Category::NonRecyclable),
            ("biological", Category::Biodegradable),
            ("organic", Category::Biodegradable),
            ("food", Category::Biodegradable),
            ("hazardous", Category::Hazardous),
        ]
        .into_iter()
        .map(|(label, category)| (label.to_string(), category));

        let partners = HashMap::from([
            (Category::Recyclable, Partner::new("TerraCycle", "terracycle@example.org")),
            (Category::Biodegradable, Partner::new("Hasiru Dala", "hasiru@example.org")),
            (Category::NonRecyclable, Partner::new("Municipal Waste", "waste@example.org")),
            (Category::Hazardous, Partner::new("Attero Recycling", "attero@example.org")),
        ]);

        let advice = HashMap::from([
            (
                Category::Recyclable,
                "Rinse and dry before recycling. Flatten boxes to save space.".to_string(),
            ),
            (
                Category::Biodegradable,
                "Compost if possible, otherwise dispose in organic waste bin.".to_string(),
            ),
            (
                Category::NonRecyclable,
                "Dispose in general waste. Avoid mixing with recyclables.".to_string(),
            ),
            (
                Category::Hazardous,
                "Handle with care. Dispose through authorized collection centers.".to_string(),
            ),
        ]);

        Self::new(categories, partners, advice)
    }
}

#[inline]
fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}
