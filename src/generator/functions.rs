//! Naming and route helper functions exposed to templates.
//!
//! Route inference follows the framework's conventional controller
//! routing: an `id` parameter becomes the leading segment(s), the method
//! name minus its verb prefix and `Async` suffix becomes the action segment,
//! and a single secondary `...Id` parameter is appended after it.

use super::catalog::{TypeCatalog, TypeShape};
use super::conventions::{conventional_verb, remove_verb_prefix};
use super::models::{MethodInfo, PropertyInfo};

/// Prefix of the generated verb attribute, e.g. `HttpGet`
pub const HTTP_VERB_ATTRIBUTE_PREFIX: &str = "Http";

const ASYNC_SUFFIX: &str = "Async";

/// (type, name) pairs omitted from generated DTOs
const IGNORED_PROPERTIES: &[(&str, &str)] = &[("Guid?", "TenantId")];

/// Camel-case each `.`-separated segment
pub fn camel_case(text: &str) -> String {
    text.split('.')
        .map(to_camel_case)
        .collect::<Vec<_>>()
        .join(".")
}

/// Lower-case the first character of a single identifier
pub fn to_camel_case(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Plural form by simple English rules, e.g. `Category` -> `Categories`
pub fn pluralize(name: &str) -> String {
    if name.ends_with('s') || name.ends_with('x') || name.ends_with("sh") || name.ends_with("ch") {
        format!("{name}es")
    } else if name.ends_with('y')
        && !name.ends_with("ey")
        && !name.ends_with("ay")
        && !name.ends_with("oy")
    {
        format!("{}ies", &name[..name.len() - 1])
    } else {
        format!("{name}s")
    }
}

/// Whether a property is left out of generated DTOs
pub fn is_ignore_property(property: &PropertyInfo) -> bool {
    IGNORED_PROPERTIES
        .iter()
        .any(|(type_name, name)| property.type_name == *type_name && property.name == *name)
}

/// Verb attribute name for a method, e.g. `HttpGet` for `GetListAsync`
pub fn get_http_verb(method_name: &str) -> String {
    let verb = conventional_verb(method_name).as_str();
    let (first, rest) = verb.split_at(1);
    format!(
        "{HTTP_VERB_ATTRIBUTE_PREFIX}{}{}",
        first.to_uppercase(),
        rest.to_lowercase()
    )
}

/// Relative route of a method, without a leading `/`
pub fn get_route(method: &MethodInfo, catalog: &TypeCatalog) -> String {
    let mut url = String::new();

    if let Some(id) = method.parameters.iter().find(|p| p.name == "id") {
        match catalog.resolve(&id.full_type) {
            TypeShape::Primitive => url.push_str("/{id}"),
            TypeShape::Composite(properties) => {
                for property in properties {
                    url.push_str(&format!("/{{{}}}", property.name));
                }
            }
            TypeShape::Unknown => {
                tracing::debug!(
                    "Type '{}' of parameter 'id' in '{}' is not in the catalog, binding it as a single segment",
                    id.full_type,
                    method.name
                );
                url.push_str("/{id}");
            }
        }
    }

    let verb = conventional_verb(&method.name);
    let action = remove_verb_prefix(&method.name, verb);
    let action = action.strip_suffix(ASYNC_SUFFIX).unwrap_or(action);

    if !action.is_empty() {
        url.push('/');
        url.push_str(&to_camel_case(action));

        let mut secondary_ids = method.parameters.iter().filter(|p| p.name.ends_with("Id"));
        if let (Some(only), None) = (secondary_ids.next(), secondary_ids.next()) {
            url.push_str(&format!("/{{{}}}", only.name));
        }
    }

    url.strip_prefix('/').map(String::from).unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::models::{ParameterInfo, TypeInfo, TypeKind};

    fn method(name: &str, params: &[(&str, &str)]) -> MethodInfo {
        MethodInfo::new(
            "Task",
            name,
            params
                .iter()
                .map(|(t, n)| ParameterInfo::new(*t, *n))
                .collect(),
        )
    }

    #[test]
    fn test_camel_case_dotted() {
        assert_eq!(camel_case("Foo.BarBaz"), "foo.barBaz");
        assert_eq!(camel_case("BookStore"), "bookStore");
        assert_eq!(camel_case(""), "");
        assert_eq!(camel_case("A..B"), "a..b");
    }

    #[test]
    fn test_camel_case_idempotent() {
        for input in ["Foo.BarBaz", "ID.Value", "already.camel", "X", "Über.Ärger"] {
            let once = camel_case(input);
            assert_eq!(camel_case(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("Book"), "Books");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Key"), "Keys");
        assert_eq!(pluralize("Address"), "Addresses");
        assert_eq!(pluralize("Box"), "Boxes");
    }

    #[test]
    fn test_is_ignore_property() {
        assert!(is_ignore_property(&PropertyInfo::new("Guid?", "TenantId")));
        assert!(!is_ignore_property(&PropertyInfo::new("Guid", "TenantId")));
        assert!(!is_ignore_property(&PropertyInfo::new("Guid?", "OwnerId")));
        assert!(!is_ignore_property(&PropertyInfo::new("string", "Name")));
    }

    #[test]
    fn test_get_http_verb() {
        assert_eq!(get_http_verb("GetListAsync"), "HttpGet");
        assert_eq!(get_http_verb("CreateAsync"), "HttpPost");
        assert_eq!(get_http_verb("UpdateAsync"), "HttpPut");
        assert_eq!(get_http_verb("DeleteAsync"), "HttpDelete");
        assert_eq!(get_http_verb("PatchAsync"), "HttpPatch");
        assert_eq!(get_http_verb("ApproveAsync"), "HttpPost");
    }

    #[test]
    fn test_route_get_by_id() {
        let catalog = TypeCatalog::new();
        assert_eq!(get_route(&method("GetAsync", &[("Guid", "id")]), &catalog), "{id}");
    }

    #[test]
    fn test_route_create_is_empty() {
        let catalog = TypeCatalog::new();
        let create = method("CreateAsync", &[("CreateBookDto", "input")]);
        assert_eq!(get_route(&create, &catalog), "");
    }

    #[test]
    fn test_route_with_single_secondary_id() {
        let catalog = TypeCatalog::new();
        let list = method("GetListAsync", &[("Guid", "id"), ("Guid", "bookId")]);
        assert_eq!(get_route(&list, &catalog), "{id}/list/{bookId}");
    }

    #[test]
    fn test_route_with_ambiguous_secondary_ids() {
        let catalog = TypeCatalog::new();
        let list = method(
            "GetListAsync",
            &[("Guid", "id"), ("Guid", "bookId"), ("Guid", "authorId")],
        );
        assert_eq!(get_route(&list, &catalog), "{id}/list");
    }

    #[test]
    fn test_route_action_without_id() {
        let catalog = TypeCatalog::new();
        let publish = method("PublishAsync", &[("Guid", "bookId")]);
        assert_eq!(get_route(&publish, &catalog), "publish/{bookId}");
    }

    #[test]
    fn test_route_composite_id() {
        let mut catalog = TypeCatalog::new();
        catalog.insert(TypeInfo {
            namespace: "Acme.BookStore.Books".into(),
            name: "BookKey".into(),
            kind: TypeKind::Class,
            base_types: vec![],
            properties: vec![
                PropertyInfo::new("Guid", "StoreId"),
                PropertyInfo::new("string", "Isbn"),
            ],
            methods: vec![],
        });

        let get = method("GetAsync", &[("BookKey", "id")]);
        assert_eq!(get_route(&get, &catalog), "{StoreId}/{Isbn}");
    }

    #[test]
    fn test_route_enum_id() {
        let mut catalog = TypeCatalog::new();
        catalog.insert(TypeInfo {
            namespace: "Acme".into(),
            name: "Shelf".into(),
            kind: TypeKind::Enum,
            base_types: vec![],
            properties: vec![],
            methods: vec![],
        });

        let delete = method("DeleteAsync", &[("Shelf", "id")]);
        assert_eq!(get_route(&delete, &catalog), "{id}");
    }
}
