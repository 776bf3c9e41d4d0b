//! Directory filtering and ordering.
//!
//! Given an in-memory array of display users and a declarative
//! filter/sort specification, produces the visible subset in display
//! order. Pure and deterministic; the input slice is never mutated.

use std::cmp::Ordering;

use crate::model::User;

/// Declarative filter over the user directory.
///
/// `search` is a case-insensitive substring match across name, email
/// and id; each list acts as an allow-list on its field and an empty
/// list disables that dimension. All active filters AND together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub search: String,
    pub departments: Vec<String>,
    pub courses: Vec<String>,
    pub grad_years: Vec<i32>,
}

impl FilterSpec {
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        if !self.search.is_empty() {
            let term = self.search.to_lowercase();
            let hit = user.name.to_lowercase().contains(&term)
                || user.email.to_lowercase().contains(&term)
                || user.id.to_string().to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        if !self.departments.is_empty() && !self.departments.contains(&user.department) {
            return false;
        }
        if !self.courses.is_empty() && !self.courses.contains(&user.course) {
            return false;
        }
        if !self.grad_years.is_empty() {
            match user.grad_year {
                Some(year) if self.grad_years.contains(&year) => {}
                _ => return false,
            }
        }
        true
    }

    /// True when no dimension is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.departments.is_empty()
            && self.courses.is_empty()
            && self.grad_years.is_empty()
    }
}

/// Sortable columns of the directory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Email,
    Department,
    Course,
    GradYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active (key, direction) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Name,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortSpec {
    /// Applies a header click: the active key flips direction, a new
    /// key resets to ascending.
    #[must_use]
    pub fn toggle(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self { key, direction }
    }
}

fn compare(a: &User, b: &User, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Email => a.email.cmp(&b.email),
        SortKey::Department => a.department.cmp(&b.department),
        SortKey::Course => a.course.cmp(&b.course),
        // Missing graduation year orders as 0; display still shows "N/A".
        SortKey::GradYear => a.grad_year.unwrap_or(0).cmp(&b.grad_year.unwrap_or(0)),
    }
}

/// Produces the visible, ordered subset of `records`.
///
/// Filtering is O(n); ordering is a stable O(n log n) sort, so records
/// with equal keys keep their relative input order. The input slice is
/// copied, never mutated.
#[must_use]
pub fn apply_filter_and_sort(records: &[User], filter: &FilterSpec, sort: &SortSpec) -> Vec<User> {
    let mut visible: Vec<User> = records
        .iter()
        .filter(|user| filter.matches(user))
        .cloned()
        .collect();

    visible.sort_by(|a, b| {
        let ordering = compare(a, b, sort.key);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;
    use crate::time::fixed_now;

    fn user(name: &str, email: &str, grad_year: Option<i32>) -> User {
        User {
            id: UserId::generate(),
            name: name.to_string(),
            email: email.to_string(),
            avatar: String::new(),
            grad_year,
            department: String::new(),
            course: String::new(),
            location: String::new(),
            bio: String::new(),
            join_date: fixed_now(),
        }
    }

    fn names(users: &[User]) -> Vec<&str> {
        users.iter().map(|u| u.name.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let out = apply_filter_and_sort(&[], &FilterSpec::default(), &SortSpec::default());
        assert!(out.is_empty());
    }

    #[test]
    fn sorts_by_name_and_toggle_flips_direction() {
        let records = vec![user("Bob", "b@x.com", None), user("Ann", "a@x.com", None)];
        let sort = SortSpec::default();

        let asc = apply_filter_and_sort(&records, &FilterSpec::default(), &sort);
        assert_eq!(names(&asc), ["Ann", "Bob"]);

        let desc = apply_filter_and_sort(&records, &FilterSpec::default(), &sort.toggle(SortKey::Name));
        assert_eq!(names(&desc), ["Bob", "Ann"]);
    }

    #[test]
    fn toggle_to_new_key_resets_to_ascending() {
        let sort = SortSpec {
            key: SortKey::Name,
            direction: SortDirection::Descending,
        };
        let toggled = sort.toggle(SortKey::Email);
        assert_eq!(toggled.key, SortKey::Email);
        assert_eq!(toggled.direction, SortDirection::Ascending);
    }

    #[test]
    fn search_spans_name_email_and_id() {
        let records = vec![
            user("Robert", "ann@example.com", None),
            user("Carol", "c@example.com", None),
        ];
        let filter = FilterSpec {
            search: "ann".to_string(),
            ..FilterSpec::default()
        };
        let out = apply_filter_and_sort(&records, &filter, &SortSpec::default());
        assert_eq!(names(&out), ["Robert"]);

        let by_id = FilterSpec {
            search: records[1].id.to_string(),
            ..FilterSpec::default()
        };
        let out = apply_filter_and_sort(&records, &by_id, &SortSpec::default());
        assert_eq!(names(&out), ["Carol"]);
    }

    #[test]
    fn allow_lists_exclude_missing_and_unlisted_values() {
        let mut a = user("Ann", "a@x.com", Some(2024));
        a.department = "CSE".to_string();
        let b = user("Bob", "b@x.com", None);
        let records = vec![a, b];

        let filter = FilterSpec {
            departments: vec!["CSE".to_string()],
            ..FilterSpec::default()
        };
        let out = apply_filter_and_sort(&records, &filter, &SortSpec::default());
        assert_eq!(names(&out), ["Ann"]);

        // Missing grad year fails a non-empty grad-year list.
        let filter = FilterSpec {
            grad_years: vec![2024],
            ..FilterSpec::default()
        };
        let out = apply_filter_and_sort(&records, &filter, &SortSpec::default());
        assert_eq!(names(&out), ["Ann"]);

        // A value no record carries matches nothing, without error.
        let filter = FilterSpec {
            grad_years: vec![1999],
            ..FilterSpec::default()
        };
        let out = apply_filter_and_sort(&records, &filter, &SortSpec::default());
        assert!(out.is_empty());
    }

    #[test]
    fn filters_and_together() {
        let mut a = user("Ann", "a@x.com", Some(2024));
        a.department = "CSE".to_string();
        let mut b = user("Annette", "an@x.com", Some(2024));
        b.department = "ECE".to_string();
        let records = vec![a, b];

        let filter = FilterSpec {
            search: "ann".to_string(),
            departments: vec!["CSE".to_string()],
            grad_years: vec![2024],
            ..FilterSpec::default()
        };
        let out = apply_filter_and_sort(&records, &filter, &SortSpec::default());
        assert_eq!(names(&out), ["Ann"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = vec![
            user("Ann", "a@x.com", Some(2024)),
            user("Bob", "b@x.com", None),
            user("Carol", "ann@y.com", Some(2023)),
        ];
        let filter = FilterSpec {
            search: "ann".to_string(),
            ..FilterSpec::default()
        };
        let sort = SortSpec::default().toggle(SortKey::Name);

        let once = apply_filter_and_sort(&records, &filter, &sort);
        let twice = apply_filter_and_sort(&once, &filter, &sort);
        assert_eq!(once, twice);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let records = vec![
            user("Ann", "third@x.com", Some(2024)),
            user("Ann", "first@x.com", Some(2024)),
            user("Ann", "second@x.com", Some(2024)),
        ];
        let out = apply_filter_and_sort(&records, &FilterSpec::default(), &SortSpec::default());
        let emails: Vec<&str> = out.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, ["third@x.com", "first@x.com", "second@x.com"]);
    }

    #[test]
    fn missing_grad_year_orders_as_zero() {
        let records = vec![user("Late", "l@x.com", Some(2024)), user("None", "n@x.com", None)];
        let sort = SortSpec {
            key: SortKey::GradYear,
            direction: SortDirection::Ascending,
        };
        let out = apply_filter_and_sort(&records, &FilterSpec::default(), &sort);
        assert_eq!(names(&out), ["None", "Late"]);
    }
}
