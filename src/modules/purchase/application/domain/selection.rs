/// A course as seen by checkout: enough to price it and to know it can be enrolled in.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedCourse {
    pub id: i32,
    pub title: String,
    /// Whole hryvnias.
    pub price: i32,
    pub module_count: i64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("Valid course IDs array is required")]
    Empty,

    #[error("Courses not found: {}", join(.0))]
    NotFound(Vec<i32>),

    #[error("User has already purchased courses: {}", join(.0))]
    AlreadyPurchased(Vec<i32>),

    #[error("No modules found for courses: {}", join(.0))]
    NoModules(Vec<i32>),
}

fn join(ids: &[i32]) -> String {
    ids.iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Requested ids without duplicates, in request order.
pub fn distinct_ids(requested: &[i32]) -> Vec<i32> {
    let mut seen = Vec::with_capacity(requested.len());
    for id in requested {
        if !seen.contains(id) {
            seen.push(*id);
        }
    }
    seen
}

/// Checks a basket against the catalog and the user's library.
///
/// Order of checks: empty basket, unknown ids, already owned ids, courses without modules.
/// The returned courses follow the request order.
pub fn check_selection(
    requested: &[i32],
    found: Vec<PricedCourse>,
    owned: &[i32],
) -> Result<Vec<PricedCourse>, SelectionError> {
    let requested = distinct_ids(requested);
    if requested.is_empty() {
        return Err(SelectionError::Empty);
    }

    let missing: Vec<i32> = requested
        .iter()
        .copied()
        .filter(|id| !found.iter().any(|c| c.id == *id))
        .collect();
    if !missing.is_empty() {
        return Err(SelectionError::NotFound(missing));
    }

    let already: Vec<i32> = requested
        .iter()
        .copied()
        .filter(|id| owned.contains(id))
        .collect();
    if !already.is_empty() {
        return Err(SelectionError::AlreadyPurchased(already));
    }

    let empty: Vec<i32> = found
        .iter()
        .filter(|c| c.module_count == 0)
        .map(|c| c.id)
        .collect();
    if !empty.is_empty() {
        return Err(SelectionError::NoModules(empty));
    }

    let mut found = found;
    found.sort_by_key(|c| requested.iter().position(|id| *id == c.id));
    Ok(found)
}

/// Sum of prices in kopiyky.
pub fn total_minor_units(courses: &[PricedCourse]) -> i64 {
    courses.iter().map(|c| i64::from(c.price) * 100).sum()
}

#[cfg(test)]
pub(crate) fn priced(id: i32, price: i32) -> PricedCourse {
    PricedCourse {
        id,
        title: format!("Course {id}"),
        price,
        module_count: 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_basket() {
        assert_eq!(check_selection(&[], vec![], &[]), Err(SelectionError::Empty));
    }

    #[test]
    fn test_unknown_ids_are_listed() {
        let result = check_selection(&[1, 7, 9], vec![priced(1, 100)], &[]);

        assert_eq!(result, Err(SelectionError::NotFound(vec![7, 9])));
    }

    #[test]
    fn test_owned_ids_are_listed() {
        let result = check_selection(&[1, 2], vec![priced(1, 100), priced(2, 200)], &[2]);

        let err = result.unwrap_err();
        assert_eq!(err, SelectionError::AlreadyPurchased(vec![2]));
        assert_eq!(err.to_string(), "User has already purchased courses: 2");
    }

    #[test]
    fn test_course_without_modules() {
        let mut empty = priced(3, 100);
        empty.module_count = 0;

        let result = check_selection(&[3], vec![empty], &[]);

        assert_eq!(result, Err(SelectionError::NoModules(vec![3])));
    }

    #[test]
    fn test_duplicates_collapse_and_request_order_is_kept() {
        let courses = check_selection(&[2, 1, 2], vec![priced(1, 100), priced(2, 250)], &[]).unwrap();

        assert_eq!(courses.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(total_minor_units(&courses), 35_000);
    }
}
