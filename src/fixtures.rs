//! Shared course fixtures for unit tests.

use crate::search::types::{CourseDocument, CourseType};
use chrono::{DateTime, Utc};

pub fn ts(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

#[allow(clippy::too_many_arguments)]
pub fn course(
    id: &str,
    title: &str,
    description: &str,
    category: &str,
    course_type: CourseType,
    ages: (i32, i32),
    price: f64,
    next_session: &str,
) -> CourseDocument {
    CourseDocument {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        course_type,
        min_age: ages.0,
        max_age: ages.1,
        price,
        next_session_date: ts(next_session),
    }
}

/// A small catalogue spanning every category, type and a spread of ages,
/// prices and dates.
pub fn catalogue() -> Vec<CourseDocument> {
    vec![
        course(
            "c1",
            "Karate Basics",
            "Stances, blocks and kicks for beginners.",
            "Sports",
            CourseType::Course,
            (5, 12),
            60.0,
            "2026-03-01T10:00:00Z",
        ),
        course(
            "c2",
            "Watercolor Landscapes",
            "Paint skies and rivers with wet-on-wet technique.",
            "Arts",
            CourseType::Course,
            (9, 14),
            45.0,
            "2026-01-15T15:00:00Z",
        ),
        course(
            "c3",
            "Clay Sculpture Workshop",
            "Hand-build animals from air-dry clay.",
            "Arts",
            CourseType::OneTime,
            (6, 11),
            25.0,
            "2026-02-10T14:00:00Z",
        ),
        course(
            "c4",
            "Robotics Lab",
            "Program small robots that follow lines.",
            "Technology",
            CourseType::Club,
            (9, 14),
            120.0,
            "2026-04-20T16:00:00Z",
        ),
        course(
            "c5",
            "Tennis for Teens",
            "Serve, volley and match strategy.",
            "Sports",
            CourseType::Course,
            (13, 17),
            90.0,
            "2026-05-05T09:00:00Z",
        ),
    ]
}
