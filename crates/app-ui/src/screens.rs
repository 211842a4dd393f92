//! Screen registry for MyJSI
//!
//! Screens are addressed by `/`-delimited identifiers such as
//! `products/category/lounge`. The first segment names the screen and the
//! remaining segments carry route parameters. The navigation core stores
//! identifiers verbatim; only this registry interprets them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// =============================================================================
// Screen Identifiers
// =============================================================================

/// A navigable screen identifier (e.g. `products/category/lounge`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenId(String);

impl ScreenId {
    /// Create an identifier from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The full identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty `/`-delimited segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// First segment, naming the screen
    pub fn base(&self) -> &str {
        self.segments().next().unwrap_or("")
    }
}

impl std::fmt::Display for ScreenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScreenId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ScreenId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// =============================================================================
// Route Definitions
// =============================================================================

/// Parameters extracted from an identifier
pub type RouteParams = HashMap<String, String>;

/// All screens known to the application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "screen", content = "params")]
pub enum Route {
    /// Home dashboard
    Home,
    /// Product catalog
    Products,
    /// Products in one category
    ProductCategory {
        /// Category slug
        category: String,
    },
    /// Single product
    ProductDetail {
        /// Category slug
        category: String,
        /// Product identifier
        product: String,
    },
    /// Open orders
    Orders,
    /// Single order
    OrderDetail {
        /// Order number
        order: String,
    },
    /// Sample library
    Samples,
    /// Samples in one category
    SampleCategory {
        /// Category slug
        category: String,
    },
    /// Dealer directory
    Dealers,
    /// Single dealer
    DealerDetail {
        /// Dealer identifier
        dealer: String,
    },
    /// Commission reports
    Commissions,
    /// Commissions for one year
    CommissionYear {
        /// Four digit year
        year: String,
    },
    /// Community feed
    Community,
    /// Single community post
    CommunityPost {
        /// Post identifier
        post: String,
    },
    /// Resource index
    Resources,
    /// Single resource page
    ResourceDetail {
        /// Topic slug
        topic: String,
    },
    /// Members
    Members,
    /// Settings
    Settings,
    /// Search
    Search,
    /// Screen registered at runtime
    Custom {
        /// Registered screen name
        name: String,
    },
    /// Placeholder for identifiers nothing matched
    NotFound {
        /// The unresolved identifier
        identifier: String,
    },
}

impl Route {
    /// Screen title shown in the header
    pub fn title(&self) -> &str {
        match self {
            Route::Home => "Home",
            Route::Products | Route::ProductCategory { .. } => "Products",
            Route::ProductDetail { .. } => "Product",
            Route::Orders => "Orders",
            Route::OrderDetail { .. } => "Order",
            Route::Samples | Route::SampleCategory { .. } => "Samples",
            Route::Dealers => "Dealers",
            Route::DealerDetail { .. } => "Dealer",
            Route::Commissions | Route::CommissionYear { .. } => "Commissions",
            Route::Community | Route::CommunityPost { .. } => "Community",
            Route::Resources | Route::ResourceDetail { .. } => "Resources",
            Route::Members => "Members",
            Route::Settings => "Settings",
            Route::Search => "Search",
            Route::Custom { name } => name.as_str(),
            Route::NotFound { .. } => "Not Found",
        }
    }

    /// Check if this is the placeholder route
    pub fn is_not_found(&self) -> bool {
        matches!(self, Route::NotFound { .. })
    }
}

/// A resolved screen: the view to render plus its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenDescriptor {
    /// Identifier that was resolved
    pub id: ScreenId,
    /// View to render
    pub route: Route,
    /// Parameters extracted from the identifier
    pub params: RouteParams,
}

// =============================================================================
// Registry
// =============================================================================

/// Errors raised when registering a screen pattern
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Pattern has an empty or unnamed segment
    #[error("Malformed pattern: {0}")]
    MalformedPattern(String),

    /// An equivalent pattern already exists
    #[error("Pattern already registered: {0}")]
    DuplicatePattern(String),
}

/// Segment type in a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternSegment {
    /// Literal segment
    Literal(String),
    /// Parameter segment
    Param(String),
}

impl PatternSegment {
    /// Two segments collide if they would match the same input
    fn collides_with(&self, other: &PatternSegment) -> bool {
        match (self, other) {
            (PatternSegment::Literal(a), PatternSegment::Literal(b)) => a == b,
            (PatternSegment::Param(_), PatternSegment::Param(_)) => true,
            _ => false,
        }
    }
}

enum RouteBuilder {
    Builtin(fn(&RouteParams) -> Option<Route>),
    Custom(String),
}

/// Route pattern for matching
struct RoutePattern {
    source: String,
    segments: Vec<PatternSegment>,
    builder: RouteBuilder,
}

/// Maps screen identifiers to views
pub struct ScreenRegistry {
    patterns: Vec<RoutePattern>,
}

impl Default for ScreenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenRegistry {
    /// Create a registry with every MyJSI screen
    pub fn new() -> Self {
        let mut registry = Self::empty();

        let builtins: [(&str, fn(&RouteParams) -> Option<Route>); 19] = [
            ("home", |_| Some(Route::Home)),
            ("products", |_| Some(Route::Products)),
            ("products/category/:category", |p| {
                Some(Route::ProductCategory {
                    category: p.get("category")?.clone(),
                })
            }),
            ("products/category/:category/:product", |p| {
                Some(Route::ProductDetail {
                    category: p.get("category")?.clone(),
                    product: p.get("product")?.clone(),
                })
            }),
            ("orders", |_| Some(Route::Orders)),
            ("orders/:order", |p| {
                Some(Route::OrderDetail {
                    order: p.get("order")?.clone(),
                })
            }),
            ("samples", |_| Some(Route::Samples)),
            ("samples/category/:category", |p| {
                Some(Route::SampleCategory {
                    category: p.get("category")?.clone(),
                })
            }),
            ("dealers", |_| Some(Route::Dealers)),
            ("dealers/:dealer", |p| {
                Some(Route::DealerDetail {
                    dealer: p.get("dealer")?.clone(),
                })
            }),
            ("commissions", |_| Some(Route::Commissions)),
            ("commissions/:year", |p| {
                let year = p.get("year")?;
                if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
                    Some(Route::CommissionYear { year: year.clone() })
                } else {
                    None
                }
            }),
            ("community", |_| Some(Route::Community)),
            ("community/post/:post", |p| {
                Some(Route::CommunityPost {
                    post: p.get("post")?.clone(),
                })
            }),
            ("resources", |_| Some(Route::Resources)),
            ("resources/:topic", |p| {
                Some(Route::ResourceDetail {
                    topic: p.get("topic")?.clone(),
                })
            }),
            ("members", |_| Some(Route::Members)),
            ("settings", |_| Some(Route::Settings)),
            ("search", |_| Some(Route::Search)),
        ];

        for (pattern, builder) in builtins {
            // Built-in table is static and collision free
            if let Ok(segments) = registry.check_pattern(pattern) {
                registry.patterns.push(RoutePattern {
                    source: pattern.to_string(),
                    segments,
                    builder: RouteBuilder::Builtin(builder),
                });
            }
        }

        registry
    }

    /// Create a registry with no screens
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Register a runtime screen under `pattern` (e.g. `reports/:kind`)
    pub fn register(
        &mut self,
        pattern: &str,
        name: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let segments = self.check_pattern(pattern)?;
        self.patterns.push(RoutePattern {
            source: pattern.to_string(),
            segments,
            builder: RouteBuilder::Custom(name.into()),
        });
        Ok(())
    }

    /// Number of registered patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if no patterns are registered
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Resolve an identifier; unknown identifiers yield [`Route::NotFound`]
    pub fn resolve(&self, id: &ScreenId) -> ScreenDescriptor {
        let path: Vec<&str> = id.segments().collect();

        for pattern in &self.patterns {
            let Some(params) = match_pattern(&pattern.segments, &path) else {
                continue;
            };
            let route = match &pattern.builder {
                RouteBuilder::Builtin(build) => build(&params),
                RouteBuilder::Custom(name) => Some(Route::Custom { name: name.clone() }),
            };
            if let Some(route) = route {
                return ScreenDescriptor {
                    id: id.clone(),
                    route,
                    params,
                };
            }
        }

        tracing::debug!(screen = %id, "no screen registered for identifier");
        ScreenDescriptor {
            id: id.clone(),
            route: Route::NotFound {
                identifier: id.to_string(),
            },
            params: RouteParams::new(),
        }
    }

    fn check_pattern(&self, pattern: &str) -> Result<Vec<PatternSegment>, RegistryError> {
        let segments = parse_pattern(pattern)?;

        let duplicate = self.patterns.iter().any(|existing| {
            existing.segments.len() == segments.len()
                && existing
                    .segments
                    .iter()
                    .zip(&segments)
                    .all(|(a, b)| a.collides_with(b))
        });
        if duplicate {
            return Err(RegistryError::DuplicatePattern(pattern.to_string()));
        }

        Ok(segments)
    }

    /// Registered pattern strings, in match order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.source.as_str())
    }
}

fn parse_pattern(pattern: &str) -> Result<Vec<PatternSegment>, RegistryError> {
    let trimmed = pattern.trim_matches('/');
    if trimmed.is_empty() {
        return Err(RegistryError::MalformedPattern(pattern.to_string()));
    }

    let mut segments = Vec::new();
    for segment in trimmed.split('/') {
        let parsed = match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() => {
                if segments
                    .iter()
                    .any(|s| matches!(s, PatternSegment::Param(n) if n == name))
                {
                    return Err(RegistryError::MalformedPattern(pattern.to_string()));
                }
                PatternSegment::Param(name.to_string())
            }
            None if !segment.is_empty() => PatternSegment::Literal(segment.to_string()),
            _ => return Err(RegistryError::MalformedPattern(pattern.to_string())),
        };
        segments.push(parsed);
    }

    Ok(segments)
}

/// Match a pattern against identifier segments
fn match_pattern(pattern: &[PatternSegment], path: &[&str]) -> Option<RouteParams> {
    if pattern.len() != path.len() {
        return None;
    }

    let mut params = RouteParams::new();
    for (segment, actual) in pattern.iter().zip(path) {
        match segment {
            PatternSegment::Literal(expected) => {
                if expected != *actual {
                    return None;
                }
            }
            PatternSegment::Param(name) => {
                params.insert(name.clone(), urlencoding::decode(actual).ok()?.into_owned());
            }
        }
    }

    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(id: &str) -> Route {
        ScreenRegistry::new().resolve(&ScreenId::from(id)).route
    }

    #[test]
    fn test_screen_id_segments() {
        let id = ScreenId::from("products/category/lounge");
        assert_eq!(id.base(), "products");
        assert_eq!(id.segments().collect::<Vec<_>>(), ["products", "category", "lounge"]);
        assert_eq!(ScreenId::from("").base(), "");
    }

    #[test]
    fn test_resolve_home() {
        assert_eq!(resolve("home"), Route::Home);
    }

    #[test]
    fn test_resolve_category_with_params() {
        let registry = ScreenRegistry::new();
        let descriptor = registry.resolve(&ScreenId::from("products/category/lounge"));
        assert_eq!(
            descriptor.route,
            Route::ProductCategory {
                category: "lounge".to_string()
            }
        );
        assert_eq!(descriptor.params.get("category").map(String::as_str), Some("lounge"));
        assert_eq!(descriptor.id.as_str(), "products/category/lounge");
    }

    #[test]
    fn test_resolve_product_detail() {
        assert_eq!(
            resolve("products/category/casegoods/vision"),
            Route::ProductDetail {
                category: "casegoods".to_string(),
                product: "vision".to_string()
            }
        );
    }

    #[test]
    fn test_params_are_percent_decoded() {
        assert_eq!(
            resolve("resources/lead%20times"),
            Route::ResourceDetail {
                topic: "lead times".to_string()
            }
        );
    }

    #[test]
    fn test_commission_year_must_be_numeric() {
        assert_eq!(
            resolve("commissions/2024"),
            Route::CommissionYear {
                year: "2024".to_string()
            }
        );
        assert!(resolve("commissions/last-year").is_not_found());
    }

    #[test]
    fn test_unknown_identifier_is_not_found() {
        let route = resolve("warehouse/aisle/7");
        assert_eq!(
            route,
            Route::NotFound {
                identifier: "warehouse/aisle/7".to_string()
            }
        );
        assert_eq!(route.title(), "Not Found");
    }

    #[test]
    fn test_register_custom_screen() {
        let mut registry = ScreenRegistry::new();
        registry.register("reports/:kind", "Reports").unwrap();

        let descriptor = registry.resolve(&ScreenId::from("reports/quarterly"));
        assert_eq!(
            descriptor.route,
            Route::Custom {
                name: "Reports".to_string()
            }
        );
        assert_eq!(descriptor.route.title(), "Reports");
        assert_eq!(descriptor.params.get("kind").map(String::as_str), Some("quarterly"));
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = ScreenRegistry::new();
        assert_eq!(
            registry.register("orders/:id", "Other orders"),
            Err(RegistryError::DuplicatePattern("orders/:id".to_string()))
        );
        assert_eq!(
            registry.register("/products/", "Catalog"),
            Err(RegistryError::DuplicatePattern("/products/".to_string()))
        );
    }

    #[test]
    fn test_register_rejects_malformed() {
        let mut registry = ScreenRegistry::empty();
        for pattern in ["", "/", "a//b", "a/:", "a/:x/:x"] {
            assert_eq!(
                registry.register(pattern, "Bad"),
                Err(RegistryError::MalformedPattern(pattern.to_string())),
                "pattern {:?}",
                pattern
            );
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_builtin_table_fully_registered() {
        let registry = ScreenRegistry::new();
        assert_eq!(registry.len(), 19);
        assert_eq!(registry.patterns().next(), Some("home"));
    }

    #[test]
    fn test_route_serialization() {
        let route = Route::DealerDetail {
            dealer: "d-42".to_string(),
        };
        let json = serde_json::to_string(&route).unwrap();
        assert_eq!(json, r#"{"screen":"DealerDetail","params":{"dealer":"d-42"}}"#);
        let parsed: Route = serde_json::from_str(&json).unwrap();
        assert_eq!(route, parsed);
    }
}
