use crate::error::DtrError;
use crate::model::employee::Employee;
use crate::repo::EmployeeRepository;

/// Collapse runs of whitespace and lowercase, the form both sides of a name
/// comparison are reduced to.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// The four stored permutations a submitted full name is matched against:
/// (ext first last), (first last), (first middle last),
/// (ext first middle last). Permutations with a missing optional part
/// collapse onto the shorter forms after normalization.
pub fn name_variants(e: &Employee) -> Vec<String> {
    let ext = e.name_extension.as_deref().unwrap_or("");
    let middle = e.middle_name.as_deref().unwrap_or("");
    [
        format!("{ext} {} {}", e.first_name, e.last_name),
        format!("{} {}", e.first_name, e.last_name),
        format!("{} {middle} {}", e.first_name, e.last_name),
        format!("{ext} {} {middle} {}", e.first_name, e.last_name),
    ]
    .iter()
    .map(|v| normalize_name(v))
    .collect()
}

/// Resolve a free-text full name to a single employee. Exact match on the
/// normalized permutations only; when several employees share a name, the
/// lowest id wins.
pub async fn resolve(
    employees: &dyn EmployeeRepository,
    raw: &str,
) -> Result<Employee, DtrError> {
    let normalized = normalize_name(raw);
    employees
        .find_by_full_name(&normalized)
        .await?
        .ok_or_else(|| DtrError::EmployeeNotFound {
            name: raw.trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(middle: Option<&str>, ext: Option<&str>) -> Employee {
        Employee {
            id: 1,
            employee_number: "2020-0001".to_string(),
            first_name: "Juan".to_string(),
            middle_name: middle.map(str::to_string),
            last_name: "Dela Cruz".to_string(),
            name_extension: ext.map(str::to_string),
            position: None,
            deleted_at: None,
        }
    }

    #[test]
    fn normalize_collapses_whitespace_and_case() {
        assert_eq!(normalize_name("  Juan   Dela  Cruz "), "juan dela cruz");
    }

    #[test]
    fn variants_cover_all_four_permutations() {
        let variants = name_variants(&employee(Some("Santos"), Some("Jr.")));
        assert!(variants.contains(&"jr. juan dela cruz".to_string()));
        assert!(variants.contains(&"juan dela cruz".to_string()));
        assert!(variants.contains(&"juan santos dela cruz".to_string()));
        assert!(variants.contains(&"jr. juan santos dela cruz".to_string()));
    }

    #[test]
    fn missing_parts_collapse_to_short_forms() {
        let variants = name_variants(&employee(None, None));
        for v in &variants {
            assert_eq!(v, "juan dela cruz");
        }
    }
}
