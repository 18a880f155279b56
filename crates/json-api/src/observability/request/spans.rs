//! HTTP route label helpers.

use uuid::Uuid;

/// Collapse path segments that are UUIDs so metrics label a route template
/// rather than one series per entity.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::route_label;

    #[test]
    fn route_label_replaces_uuid_segments() {
        assert_eq!(
            route_label("/customers/01890a5d-ac96-774b-b9aa-789c2d3f0c18/credits"),
            "/customers/{uuid}/credits"
        );
    }

    #[test]
    fn route_label_keeps_static_paths() {
        assert_eq!(route_label("/appointments/upcoming"), "/appointments/upcoming");
        assert_eq!(route_label("/"), "/");
    }
}
