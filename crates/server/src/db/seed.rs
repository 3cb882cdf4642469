use chrono::Utc;
use sqlx::SqlitePool;

use crate::{db::models::MaterialType, error::Result, routes::auth::hash_password};

/// Populate an empty database with initial content. Runs only when the users
/// table is empty, as a single transaction, so a partial seed never persists.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<()> {
    let users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if users > 0 {
        return Ok(());
    }

    let now = Utc::now();
    let mut tx = pool.begin().await?;

    for (name, email, password, is_admin) in [
        ("Admin User", "admin@learnhub.com", "Admin123", true),
        ("Test User", "user@example.com", "Password123", false),
    ] {
        sqlx::query(
            "INSERT INTO users (name, email, password_hash, is_admin, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(email)
        .bind(hash_password(password)?)
        .bind(is_admin)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    let courses = [
        (
            "Introduction to Cybersecurity",
            "Learn the fundamentals of cybersecurity including threat models, security principles, and basic security practices.",
            "cyber_intro.jpg",
            "cybersecurity",
            "beginner",
            true,
        ),
        (
            "Advanced Penetration Testing",
            "Master the art of ethical hacking with advanced penetration testing techniques and methodologies.",
            "pentest.jpg",
            "cybersecurity",
            "advanced",
            true,
        ),
        (
            "Full Stack Web Development",
            "Build complete web applications from front-end to back-end using modern frameworks and best practices.",
            "fullstack.jpg",
            "software_engineering",
            "intermediate",
            true,
        ),
        (
            "Python for Data Science",
            "Use Python to analyze and visualize data, build machine learning models, and extract insights.",
            "python_data.jpg",
            "software_engineering",
            "intermediate",
            false,
        ),
        (
            "Network Security Fundamentals",
            "Learn how to secure networks, implement firewalls, and protect against common network attacks.",
            "network_security.jpg",
            "cybersecurity",
            "beginner",
            false,
        ),
    ];

    let mut course_ids = Vec::new();
    for (title, description, image, category, level, featured) in courses {
        let result = sqlx::query(
            "INSERT INTO courses (title, description, image, category, level, featured, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(title)
        .bind(description)
        .bind(image)
        .bind(category)
        .bind(level)
        .bind(featured)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        course_ids.push(result.last_insert_rowid());
    }

    let articles = [
        (
            "Understanding Zero Trust Security Model",
            "The Zero Trust security model assumes that threats exist both inside and outside traditional network boundaries. This article explores the principles of Zero Trust and how to implement it in your organization.",
            "zero_trust.jpg",
            "cybersecurity",
        ),
        (
            "Best Practices for Secure Code Review",
            "Code reviews are essential for identifying security vulnerabilities before they make it to production. Learn the best practices for conducting effective security-focused code reviews.",
            "code_review.jpg",
            "software_engineering",
        ),
        (
            "Introduction to OWASP Top 10",
            "The OWASP Top 10 is a standard awareness document for developers and web application security. It represents a broad consensus about the most critical security risks to web applications.",
            "owasp.jpg",
            "cybersecurity",
        ),
        (
            "Containerization with Docker and Kubernetes",
            "Learn how to use Docker and Kubernetes to containerize and orchestrate your applications for better scalability and security.",
            "containers.jpg",
            "software_engineering",
        ),
    ];

    for (title, content, image, category) in articles {
        sqlx::query(
            "INSERT INTO articles (title, content, image, category, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(title)
        .bind(content)
        .bind(image)
        .bind(category)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    // Course steps, keyed by index into course_ids. "Python for Data Science"
    // deliberately has none, keeping the zero-step path reachable with seed data.
    let steps: [(usize, i64, &str, Option<&str>, Option<&str>); 13] = [
        (0, 1, "What is Cybersecurity?", Some("Core concepts, the CIA triad, and why security matters."), Some("https://videos.learnhub.com/cyber/intro.mp4")),
        (0, 2, "Threat Models", Some("Identifying assets, adversaries, and attack surfaces."), Some("https://videos.learnhub.com/cyber/threats.mp4")),
        (0, 3, "Security Principles", Some("Least privilege, defense in depth, and fail-safe defaults."), None),
        (0, 4, "Everyday Security Practices", Some("Passwords, updates, phishing awareness, and backups."), Some("https://videos.learnhub.com/cyber/practices.mp4")),
        (1, 1, "Reconnaissance", Some("Passive and active information gathering."), Some("https://videos.learnhub.com/pentest/recon.mp4")),
        (1, 2, "Exploitation Techniques", None, Some("https://videos.learnhub.com/pentest/exploit.mp4")),
        (1, 3, "Reporting", Some("Writing findings a client can act on."), None),
        (2, 1, "Front-End Foundations", Some("HTML, CSS, and component-based UI."), Some("https://videos.learnhub.com/fullstack/frontend.mp4")),
        (2, 2, "Back-End APIs", Some("Designing and securing REST endpoints."), Some("https://videos.learnhub.com/fullstack/backend.mp4")),
        (2, 3, "Deployment", None, None),
        (4, 1, "Network Fundamentals", Some("Protocols, ports, and the OSI model."), Some("https://videos.learnhub.com/netsec/fundamentals.mp4")),
        (4, 2, "Firewalls and Segmentation", Some("Filtering traffic and isolating critical systems."), None),
        (4, 3, "Common Network Attacks", Some("Spoofing, sniffing, and denial of service."), Some("https://videos.learnhub.com/netsec/attacks.mp4")),
    ];

    for (course_idx, number, title, description, video_url) in steps {
        sqlx::query(
            "INSERT INTO course_steps (course_id, number, title, description, video_url) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(course_ids[course_idx])
        .bind(number)
        .bind(title)
        .bind(description)
        .bind(video_url)
        .execute(&mut *tx)
        .await?;
    }

    let materials: [(usize, i64, MaterialType, &str, Option<&str>, Option<&str>); 8] = [
        (0, 1, MaterialType::Video, "Lecture: What is Cybersecurity?", Some("https://videos.learnhub.com/cyber/intro.mp4"), None),
        (0, 1, MaterialType::Text, "Reading: The CIA Triad", None, Some("Confidentiality, integrity, and availability form the foundation of information security.")),
        (0, 2, MaterialType::Document, "Worksheet: Build a Threat Model", Some("https://files.learnhub.com/cyber/threat-model.pdf"), None),
        (0, 2, MaterialType::Quiz, "Quiz: Threat Modeling Basics", None, Some("Five questions covering assets, adversaries, and attack surfaces.")),
        (0, 3, MaterialType::Text, "Reading: Defense in Depth", None, Some("Layered controls ensure that the failure of any single defense does not compromise the system.")),
        (1, 1, MaterialType::Video, "Lecture: Reconnaissance", Some("https://videos.learnhub.com/pentest/recon.mp4"), None),
        (2, 1, MaterialType::Video, "Lecture: Front-End Foundations", Some("https://videos.learnhub.com/fullstack/frontend.mp4"), None),
        (4, 2, MaterialType::Quiz, "Quiz: Firewall Rules", None, Some("Scenario-based questions on ingress and egress filtering.")),
    ];

    for (course_idx, step_number, material_type, title, url, content) in materials {
        sqlx::query(
            "INSERT INTO learning_materials (course_id, step_number, material_type, title, url, content) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(course_ids[course_idx])
        .bind(step_number)
        .bind(material_type)
        .bind(title)
        .bind(url)
        .bind(content)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::info!("sample data created");

    Ok(())
}
