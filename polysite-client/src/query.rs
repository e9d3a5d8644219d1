//! CMS query construction using the bracketed parameter convention.

use polysite_types::{Locale, SortOrder};

/// A CMS collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Articles,
    Categories,
}

impl Resource {
    /// API path relative to the CMS base URL
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Articles => "/api/articles",
            Resource::Categories => "/api/categories",
        }
    }

    /// Relation fields always requested expanded
    pub fn populate(&self) -> &'static [&'static str] {
        match self {
            Resource::Articles => &["cover", "category", "author"],
            Resource::Categories => &["cover"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Articles => "articles",
            Resource::Categories => "categories",
        }
    }
}

/// Equality filter on a (possibly dotted) field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub value: String,
}

impl Filter {
    /// `filters[category][slug][$eq]` for field `category.slug`
    fn param_name(&self) -> String {
        let nested: String = self
            .field
            .split('.')
            .filter(|segment| !segment.is_empty())
            .map(|segment| format!("[{}]", segment))
            .collect();
        format!("filters{}[$eq]", nested)
    }
}

/// Sort order on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    /// Parse `field` or `field:asc|desc`
    pub fn parse(raw: &str) -> Option<Self> {
        let (field, order) = match raw.split_once(':') {
            Some((field, order)) => (field, SortOrder::from_str(order)?),
            None => (raw, SortOrder::Asc),
        };
        let field = field.trim();
        if field.is_empty() {
            return None;
        }
        Some(Self::new(field, order))
    }

    fn param_value(&self) -> String {
        format!("{}:{}", self.field, self.order.as_str())
    }
}

/// Parameters for a collection read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentQuery {
    pub locale: Locale,
    pub filters: Vec<Filter>,
    pub sort: Option<Sort>,
    pub page_size: Option<u32>,
    pub page: Option<u32>,
}

impl ContentQuery {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    /// Build a query from a raw locale code; unknown codes use the default locale
    pub fn for_locale_code(code: &str) -> Self {
        Self::new(Locale::parse_or_default(code))
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(Sort::new(field, order));
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Query-string pairs for a request against `resource`
    pub fn to_pairs(&self, resource: Resource) -> Vec<(String, String)> {
        let mut pairs = vec![("locale".to_string(), self.locale.as_str().to_string())];

        for field in resource.populate() {
            pairs.push((format!("populate[{}]", field), "true".to_string()));
        }

        for filter in &self.filters {
            pairs.push((filter.param_name(), filter.value.clone()));
        }

        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.param_value()));
        }

        if let Some(page_size) = self.page_size {
            pairs.push(("pagination[pageSize]".to_string(), page_size.to_string()));
        }

        if let Some(page) = self.page {
            pairs.push(("pagination[page]".to_string(), page.to_string()));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_minimal_query() {
        let pairs = ContentQuery::new(Locale::Ja).to_pairs(Resource::Categories);
        assert_eq!(
            pairs,
            vec![pair("locale", "ja"), pair("populate[cover]", "true")]
        );
    }

    #[test]
    fn test_full_query() {
        let query = ContentQuery::new(Locale::Fr)
            .filter("slug", "hello")
            .filter("category.slug", "news")
            .sort("publishedAt", SortOrder::Desc)
            .page_size(5)
            .page(2);

        let pairs = query.to_pairs(Resource::Articles);
        assert_eq!(
            pairs,
            vec![
                pair("locale", "fr"),
                pair("populate[cover]", "true"),
                pair("populate[category]", "true"),
                pair("populate[author]", "true"),
                pair("filters[slug][$eq]", "hello"),
                pair("filters[category][slug][$eq]", "news"),
                pair("sort", "publishedAt:desc"),
                pair("pagination[pageSize]", "5"),
                pair("pagination[page]", "2"),
            ]
        );
    }

    #[test]
    fn test_unknown_locale_code_uses_default() {
        let query = ContentQuery::for_locale_code("xx-YY");
        assert_eq!(query.locale, Locale::En);
        assert_eq!(query.to_pairs(Resource::Articles)[0], pair("locale", "en"));
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(
            Sort::parse("publishedAt:desc"),
            Some(Sort::new("publishedAt", SortOrder::Desc))
        );
        assert_eq!(Sort::parse("title"), Some(Sort::new("title", SortOrder::Asc)));
        assert_eq!(Sort::parse("title:sideways"), None);
        assert_eq!(Sort::parse(":asc"), None);
    }

    #[test]
    fn test_resource_paths() {
        assert_eq!(Resource::Articles.path(), "/api/articles");
        assert_eq!(Resource::Categories.path(), "/api/categories");
    }
}
