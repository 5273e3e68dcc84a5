use serde::Deserialize;

/// The closed set of orderable product SKUs, in display order.
///
/// Supplied by configuration — built from an iterator by the wiring layer
/// or parsed from a YAML document:
///
/// ```yaml
/// products:
///   - Sphaerex - 2x2.5 gal
///   - Veltyma - 2x1 gal
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCatalog {
    names: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogYaml {
    #[serde(default)]
    products: Vec<String>,
}

impl ProductCatalog {
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let raw: CatalogYaml = serde_yaml::from_str(yaml)?;
        Ok(Self { names: raw.products })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Selectable names in configured order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_configured_order() {
        let catalog = ProductCatalog::new(["B", "A", "C"]);
        assert_eq!(catalog.names(), ["B", "A", "C"]);
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("A"));
        assert!(!catalog.contains("a"));
        assert!(!catalog.contains("D"));
    }

    #[test]
    fn parses_from_yaml() {
        let yaml = r#"
products:
  - Sphaerex - 2x2.5 gal
  - Priaxor - 2x2.5 gal
  - Nexicor - 2x2.5 gal
  - Veltyma - 2x1 gal
"#;
        let catalog = ProductCatalog::from_yaml_str(yaml).unwrap();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.contains("Veltyma - 2x1 gal"));
    }

    #[test]
    fn empty_document_yields_empty_catalog() {
        let catalog = ProductCatalog::from_yaml_str("{}").unwrap();
        assert!(catalog.is_empty());
    }
}
