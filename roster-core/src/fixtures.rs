//! Demo roster used to seed a freshly loaded store.

use crate::{Gender, IdGenerator, Status, StudentDraft, StudentRecord};

#[allow(clippy::too_many_arguments)]
fn student(
    first_name: &str,
    last_name: &str,
    email: &str,
    grade: &str,
    major: &str,
    enrollment_date: &str,
    status: Status,
    gender: Gender,
    phone_number: &str,
    address: &str,
) -> StudentDraft {
    StudentDraft {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        grade: grade.to_string(),
        major: major.to_string(),
        enrollment_date: enrollment_date.to_string(),
        status,
        gender,
        phone_number: phone_number.to_string(),
        address: address.to_string(),
    }
}

/// Five sample students covering every status and both named genders.
pub fn sample_students(ids: &dyn IdGenerator) -> Vec<StudentRecord> {
    let drafts = [
        student(
            "John",
            "Doe",
            "john.doe@example.com",
            "A",
            "Computer Science",
            "2023-09-01",
            Status::Active,
            Gender::Male,
            "123-456-7890",
            "123 University Ave, College Town, CT 12345",
        ),
        student(
            "Jane",
            "Smith",
            "jane.smith@example.com",
            "B+",
            "Business Administration",
            "2022-09-01",
            Status::Active,
            Gender::Female,
            "123-456-7891",
            "456 College St, University City, UC 67890",
        ),
        student(
            "Michael",
            "Johnson",
            "michael.j@example.com",
            "A-",
            "Mathematics",
            "2023-01-15",
            Status::Active,
            Gender::Male,
            "123-456-7892",
            "789 Academy Rd, Learning Heights, LH 23456",
        ),
        student(
            "Emily",
            "Williams",
            "emily.w@example.com",
            "A",
            "Biology",
            "2022-01-15",
            Status::Graduated,
            Gender::Female,
            "123-456-7893",
            "321 Science Blvd, Research Park, RP 34567",
        ),
        student(
            "David",
            "Brown",
            "david.b@example.com",
            "C",
            "Psychology",
            "2023-09-01",
            Status::Inactive,
            Gender::Male,
            "123-456-7894",
            "654 Mind St, Psychology Town, PT 45678",
        ),
    ];

    drafts
        .into_iter()
        .map(|draft| StudentRecord::new(ids.next_id(), draft))
        .collect()
}
