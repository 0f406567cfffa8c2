//! Bundled sample roster, used to seed a fresh registry.

use crate::model::{Status, Student, StudentAttrs};

#[rustfmt::skip]
const SAMPLE: [(&str, &str, &str, &str, f64, &str, &str, &str, Status); 10] = [
    ("S001", "John Doe", "Computer Science", "300", 3.8, "john.doe@email.com", "123-456-7890", "2024-01-15 10:30:00", Status::Active),
    ("S002", "Jane Smith", "Engineering", "200", 3.5, "jane.smith@email.com", "234-567-8901", "2024-01-20 14:20:00", Status::Active),
    ("S003", "Bob Johnson", "Business", "400", 3.2, "bob.johnson@email.com", "345-678-9012", "2024-02-01 09:15:00", Status::Active),
    ("S004", "Alice Brown", "Medicine", "500", 3.9, "alice.brown@email.com", "456-789-0123", "2024-02-10 11:45:00", Status::Active),
    ("S005", "Charlie Wilson", "Arts", "100", 2.8, "charlie.wilson@email.com", "567-890-1234", "2024-02-15 16:30:00", Status::Inactive),
    ("S006", "Diana Prince", "Computer Science", "200", 3.7, "diana.prince@email.com", "678-901-2345", "2024-02-20 13:15:00", Status::Active),
    ("S007", "Bruce Wayne", "Business", "300", 3.1, "bruce.wayne@email.com", "789-012-3456", "2024-03-01 10:00:00", Status::Active),
    ("S008", "Clark Kent", "Engineering", "400", 3.4, "clark.kent@email.com", "890-123-4567", "2024-03-05 15:30:00", Status::Inactive),
    ("S009", "Peter Parker", "Computer Science", "100", 3.6, "peter.parker@email.com", "901-234-5678", "2024-03-10 09:45:00", Status::Active),
    ("S010", "Tony Stark", "Engineering", "500", 3.2, "tony.stark@email.com", "012-345-6789", "2024-03-15 14:00:00", Status::Active),
];

pub fn students() -> Vec<Student> {
    SAMPLE
        .iter()
        .map(
            |&(id, name, programme, level, gpa, email, phone, date_added, status)| {
                Student::new(
                    StudentAttrs {
                        id: id.to_string(),
                        full_name: name.to_string(),
                        programme: programme.to_string(),
                        level: level.to_string(),
                        gpa,
                        email: email.to_string(),
                        phone: phone.to_string(),
                        status,
                    },
                    date_added,
                )
            },
        )
        .collect()
}
