// Static reference data. Nothing here is ever mutated or persisted.

use serde::{Deserialize, Serialize};

use crate::profile::College;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub code: String,
    pub title: String,
    pub college: College,
    pub description: String,
    pub credits: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Academic,
    Event,
    Scholarship,
    Enrollment,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Academic => "Academic",
            Category::Event => "Event",
            Category::Scholarship => "Scholarship",
            Category::Enrollment => "Enrollment",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub date: String,
    pub content: String,
    pub category: Category,
}

fn course(id: &str, code: &str, title: &str, college: College, description: &str, credits: u8) -> Course {
    Course {
        id: id.to_string(),
        code: code.to_string(),
        title: title.to_string(),
        college,
        description: description.to_string(),
        credits,
    }
}

lazy_static::lazy_static! {
    static ref COURSES: Vec<Course> = vec![
        course("c1", "IT 101", "Introduction to Computing", College::Computing,
               "Basic hardware and software concepts.", 3),
        course("c2", "CS 211", "Data Structures and Algorithms", College::Computing,
               "Linear structures, trees, and algorithm analysis.", 3),
        course("c3", "AGRI 101", "Crop Science", College::Agriculture,
               "Principles of plant production.", 3),
        course("c4", "AGRI 215", "Soil Science", College::Agriculture,
               "Soil properties, fertility, and conservation.", 3),
        course("c5", "BIO 101", "General Biology", College::ArtsAndSciences,
               "Study of living organisms.", 3),
        course("c6", "MATH 103", "Calculus I", College::ArtsAndSciences,
               "Limits, derivatives, and applications.", 4),
        course("c7", "ES 101", "Engineering Drawing", College::Engineering,
               "Technical drafting and orthographic projection.", 2),
        course("c8", "CE 221", "Statics of Rigid Bodies", College::Engineering,
               "Force systems and equilibrium of structures.", 3),
        course("c9", "ACCT 101", "Fundamentals of Accounting", College::Business,
               "The accounting cycle for service businesses.", 3),
        course("c10", "NUR 102", "Health Assessment", College::HealthSciences,
               "Systematic physical examination across the lifespan.", 4),
        course("c11", "EDUC 110", "Child and Adolescent Learners", College::TeacherEducation,
               "Learner development and learning environments.", 3),
        course("c12", "FISH 103", "Aquaculture Systems", College::AquaticScience,
               "Pond, pen, and cage culture of freshwater species.", 3),
    ];

    static ref ANNOUNCEMENTS: Vec<Announcement> = vec![
        Announcement {
            id: "a1".to_string(),
            title: "Second Semester Enrollment AY 2025-2026".to_string(),
            date: "Jan 12, 2026".to_string(),
            content: "Final week for adding/dropping subjects at the Registrar.".to_string(),
            category: Category::Enrollment,
        },
        Announcement {
            id: "a2".to_string(),
            title: "Scholarship Renewal Notice".to_string(),
            date: "Jan 18, 2026".to_string(),
            content: "Submit grades to OSA for 2nd semester renewal.".to_string(),
            category: Category::Scholarship,
        },
        Announcement {
            id: "a3".to_string(),
            title: "48th Foundation Anniversary".to_string(),
            date: "Jan 20, 2026".to_string(),
            content: "Happy Foundation Day, Stallions! See you at the Sunken Garden.".to_string(),
            category: Category::Event,
        },
    ];
}

/// Courses offered by exactly the given college.
pub fn courses_for(college: College) -> Vec<&'static Course> {
    COURSES.iter().filter(|c| c.college == college).collect()
}

/// All bulletins, newest first by construction order. There is no real date
/// comparison behind this.
pub fn announcements() -> &'static [Announcement] {
    &ANNOUNCEMENTS
}
