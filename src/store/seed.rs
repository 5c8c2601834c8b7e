//! Demo dataset mirroring the platform's showcase deployment: two teachers,
//! three students, a small catalog with one prerequisite edge, graded
//! submissions, announcements, reviews and a forum thread.

use time::{macros::date, Duration};

use crate::core::time::now_utc;
use crate::domain::models::{
    Announcement, Assignment, Course, Grade, Module, Reply, Review, StudyMaterial, Submission,
    Thread, User, Video,
};
use crate::domain::types::UserRole;
use crate::repositories;
use crate::services::rules;
use crate::store::{RecordStore, StoreError};

/// Loads the dataset once; a store that already carries the first demo user
/// is left untouched.
pub(crate) async fn load(store: &dyn RecordStore) -> Result<(), StoreError> {
    if repositories::users::find_by_id(store, "user-1").await?.is_some() {
        return Ok(());
    }

    let now = now_utc();
    let badges: Vec<_> = rules::badge_catalog().into_iter().map(|(_, badge)| badge).collect();

    let users = [
        user("user-1", "Alice Johnson", "alice@example.com", UserRole::Teacher),
        User {
            last_login: Some(now - Duration::days(2)),
            login_streak: 2,
            ..user("user-2", "Bob Williams", "bob@example.com", UserRole::Student)
        },
        User {
            last_login: Some(now - Duration::days(1)),
            login_streak: 7,
            badges: badges.clone(),
            ..user("user-3", "Charlie Brown", "charlie@example.com", UserRole::Student)
        },
        user("user-4", "Diana Prince", "diana@example.com", UserRole::Teacher),
        user("user-5", "Ethan Hunt", "ethan@example.com", UserRole::Student),
    ];
    for entry in &users {
        repositories::users::insert(store, entry).await?;
    }

    let mut intro_react = course(
        "course-1",
        "Introduction to React",
        "Learn the fundamentals of React and modern web development.",
        "8 Weeks",
        "user-1",
        &["user-2", "user-3"],
    );
    intro_react.modules = vec![
        Module {
            id: "mod-1".to_string(),
            title: "Module 1: Getting Started".to_string(),
            videos: vec![
                Video {
                    id: "vid-1".to_string(),
                    title: "React in 100 Seconds".to_string(),
                    url: "https://www.youtube.com/embed/SqcY0GlETPk".to_string(),
                },
                Video {
                    id: "vid-2".to_string(),
                    title: "Full React Course for Beginners".to_string(),
                    url: "https://www.youtube.com/embed/bMknfKXIFA8".to_string(),
                },
            ],
            study_materials: vec![
                StudyMaterial {
                    id: "mat-1".to_string(),
                    title: "React Cheat Sheet".to_string(),
                    file_name: "react-cheatsheet.pdf".to_string(),
                },
                StudyMaterial {
                    id: "mat-2".to_string(),
                    title: "Project Setup Guide".to_string(),
                    file_name: "project-setup.docx".to_string(),
                },
            ],
        },
        Module {
            id: "mod-2".to_string(),
            title: "Module 2: Core Concepts".to_string(),
            videos: Vec::new(),
            study_materials: Vec::new(),
        },
    ];

    let mut advanced_react = course(
        "course-7",
        "Advanced React Patterns",
        "Dive deep into advanced patterns, hooks, and state management strategies.",
        "6 Weeks",
        "user-1",
        &[],
    );
    advanced_react.prerequisites = vec!["course-1".to_string()];

    let courses = [
        intro_react,
        course(
            "course-2",
            "Advanced Tailwind CSS",
            "Master utility-first CSS for rapid UI development.",
            "4 Weeks",
            "user-1",
            &["user-2"],
        ),
        course(
            "course-3",
            "Node.js for Beginners",
            "Understand the basics of server-side JavaScript with Node.js and Express.",
            "6 Weeks",
            "user-4",
            &["user-3", "user-5"],
        ),
        course(
            "course-4",
            "Data Structures in JavaScript",
            "Learn common data structures and their implementation in JS.",
            "10 Weeks",
            "user-4",
            &[],
        ),
        course(
            "course-5",
            "UI/UX Design Fundamentals",
            "A primer on the principles of user interface and user experience design.",
            "5 Weeks",
            "user-1",
            &["user-5"],
        ),
        course(
            "course-6",
            "Introduction to TypeScript",
            "Learn how to use TypeScript to build more robust and scalable web applications.",
            "4 Weeks",
            "user-4",
            &["user-2", "user-3", "user-5"],
        ),
        advanced_react,
    ];
    for entry in &courses {
        repositories::courses::insert(store, entry).await?;
    }

    let assignments = [
        Assignment {
            id: "assign-1".to_string(),
            course_id: "course-1".to_string(),
            title: "Component Lifecycle".to_string(),
            description: "Create a component that demonstrates React lifecycle methods."
                .to_string(),
            deadline: Some(date!(2026 - 08 - 15)),
        },
        Assignment {
            id: "assign-2".to_string(),
            course_id: "course-1".to_string(),
            title: "State Management with Hooks".to_string(),
            description: "Build a small app using useState and useEffect.".to_string(),
            deadline: Some(date!(2026 - 08 - 30)),
        },
        Assignment {
            id: "assign-3".to_string(),
            course_id: "course-2".to_string(),
            title: "Responsive Design Project".to_string(),
            description: "Build a responsive landing page using Tailwind CSS.".to_string(),
            deadline: Some(date!(2026 - 09 - 05)),
        },
    ];
    for entry in &assignments {
        repositories::assignments::insert(store, entry).await?;
    }

    let submissions = [
        Submission {
            id: "sub-1".to_string(),
            assignment_id: "assign-1".to_string(),
            student_id: "user-2".to_string(),
            content: Some("Here is my lifecycle component submission.".to_string()),
            file_name: None,
            grade: Some(Grade { internal: 90, external: 94, final_score: 92 }),
            letter_grade: Some("A".to_string()),
            review: Some(
                "Great work! Your understanding of component lifecycle is clear.".to_string(),
            ),
        },
        Submission {
            id: "sub-2".to_string(),
            assignment_id: "assign-1".to_string(),
            student_id: "user-3".to_string(),
            content: None,
            file_name: Some("my-lifecycle-project.zip".to_string()),
            grade: Some(Grade { internal: 86, external: 90, final_score: 88 }),
            letter_grade: Some("B+".to_string()),
            review: Some(
                "Good submission. The file structure could be better organized.".to_string(),
            ),
        },
    ];
    for entry in &submissions {
        repositories::submissions::insert(store, entry).await?;
    }

    let announcements = [
        Announcement {
            id: "anno-1".to_string(),
            course_id: "course-1".to_string(),
            title: "Welcome!".to_string(),
            content: "Welcome to Introduction to React! Please review the syllabus in Module 1."
                .to_string(),
            created_at: now - Duration::days(2),
        },
        Announcement {
            id: "anno-2".to_string(),
            course_id: "course-1".to_string(),
            title: "Assignment 1 Reminder".to_string(),
            content: "Just a reminder that Assignment 1 is due next week.".to_string(),
            created_at: now,
        },
        Announcement {
            id: "anno-3".to_string(),
            course_id: "course-2".to_string(),
            title: "Project Kick-off".to_string(),
            content: "We will be starting our responsive design project next Monday.".to_string(),
            created_at: now - Duration::days(1),
        },
    ];
    for entry in &announcements {
        repositories::announcements::insert(store, entry).await?;
    }

    let reviews = [
        Review {
            id: "rev-1".to_string(),
            course_id: "course-2".to_string(),
            student_id: "user-2".to_string(),
            student_name: "Bob Williams".to_string(),
            rating: 5,
            comment: "Excellent course! Alice explains complex topics in a simple way.".to_string(),
            created_at: now,
        },
        Review {
            id: "rev-2".to_string(),
            course_id: "course-3".to_string(),
            student_id: "user-5".to_string(),
            student_name: "Ethan Hunt".to_string(),
            rating: 4,
            comment: "Good introduction to Node.js. Could have used more practical examples."
                .to_string(),
            created_at: now,
        },
    ];
    for entry in &reviews {
        repositories::reviews::insert(store, entry).await?;
    }

    let threads = [
        Thread {
            id: "thread-1".to_string(),
            course_id: "course-1".to_string(),
            title: "Question about props vs. state".to_string(),
            content: "When should I use props and when state? What is the key difference?"
                .to_string(),
            author_id: "user-2".to_string(),
            author_name: "Bob Williams".to_string(),
            created_at: now - Duration::days(1),
        },
        Thread {
            id: "thread-2".to_string(),
            course_id: "course-1".to_string(),
            title: "Resources for React Hooks".to_string(),
            content: "Found a great article on advanced hooks, sharing it here for everyone."
                .to_string(),
            author_id: "user-3".to_string(),
            author_name: "Charlie Brown".to_string(),
            created_at: now,
        },
    ];
    for entry in &threads {
        repositories::forum::insert_thread(store, entry).await?;
    }

    let replies = [
        Reply {
            id: "reply-1".to_string(),
            thread_id: "thread-1".to_string(),
            content: "Props are passed into a component; state is managed within it.".to_string(),
            author_id: "user-1".to_string(),
            author_name: "Alice Johnson".to_string(),
            created_at: now - Duration::days(1) + Duration::hours(1),
        },
        Reply {
            id: "reply-2".to_string(),
            thread_id: "thread-1".to_string(),
            content: "That makes so much sense, thanks Alice!".to_string(),
            author_id: "user-2".to_string(),
            author_name: "Bob Williams".to_string(),
            created_at: now - Duration::days(1) + Duration::hours(2),
        },
    ];
    for entry in &replies {
        repositories::forum::insert_reply(store, entry).await?;
    }

    Ok(())
}

fn user(id: &str, name: &str, email: &str, role: UserRole) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        last_login: None,
        login_streak: 0,
        badges: Vec::new(),
    }
}

fn course(
    id: &str,
    title: &str,
    description: &str,
    duration: &str,
    teacher_id: &str,
    students_enrolled: &[&str],
) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        duration: duration.to_string(),
        teacher_id: teacher_id.to_string(),
        students_enrolled: students_enrolled.iter().map(|student| student.to_string()).collect(),
        modules: Vec::new(),
        prerequisites: Vec::new(),
    }
}
