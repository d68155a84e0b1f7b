//! Low-cardinality route labels for spans and metrics.

use uuid::Uuid;

/// Replace identifiers in a request path with placeholders.
///
/// `/api/products/<uuid>` becomes `/api/products/{product}` and any file
/// under `/uploads/` collapses to `{file}`.
pub(super) fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    if segments.first() == Some(&"uploads") {
        return "/uploads/{file}".to_owned();
    }

    let mut label = String::new();
    let mut previous = "";

    for segment in segments.into_iter().filter(|segment| !segment.is_empty()) {
        label.push('/');

        if Uuid::try_parse(segment).is_ok() {
            label.push_str(if previous == "products" {
                "{product}"
            } else {
                "{id}"
            });
        } else {
            label.push_str(segment);
        }

        previous = segment;
    }

    if label.is_empty() {
        label.push('/');
    }

    label
}
