//! Cuisine classification from a location's name and description.

/// Label used when no keyword matches.
pub const DEFAULT_CUISINE: &str = "Dining";

/// Ordered `(label, keywords)` table. The first label with a keyword found in
/// the lowercased name or description wins.
const CUISINE_KEYWORDS: &[(&str, &[&str])] = &[
    ("Coffee", &["coffee", "espresso", "latte", "cappuccino", "cafe", "prima"]),
    (
        "Asian",
        &["asian", "chinese", "hunan", "sushi", "noodle", "rice bowl", "boba", "tea"],
    ),
    (
        "Mexican",
        &["mexican", "taco", "burrito", "quesadilla", "gallo", "taqueria"],
    ),
    (
        "Mediterranean",
        &["mediterranean", "tahini", "shawarma", "falafel", "hummus", "gyros"],
    ),
    ("Italian", &["italian", "pasta", "pizza", "ciao bella"]),
    ("Indian", &["india", "curry", "tandoori"]),
    ("American", &["burger", "grill", "deli", "sandwich", "fries"]),
    ("Hawaiian", &["hawaiian", "poke", "ola ola", "loco moco"]),
    ("Dessert", &["ice cream", "dessert", "milkshake", "creamery"]),
    ("Healthy", &["salad", "smoothie", "acai", "protein", "nourish"]),
];

/// Classify a location into a display cuisine.
pub fn classify(name: &str, description: &str) -> &'static str {
    let name = name.to_lowercase();
    let description = description.to_lowercase();

    CUISINE_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|k| name.contains(k) || description.contains(k))
        })
        .map(|(label, _)| *label)
        .unwrap_or(DEFAULT_CUISINE)
}
