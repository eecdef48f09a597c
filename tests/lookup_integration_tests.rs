use std::collections::BTreeMap;
use std::fs;

use teacher_finder_bot::database::connection::DatabaseManager;
use teacher_finder_bot::services::dataset::{
    build_dataset, load_addresses, load_group_classes, load_teacher_names,
};
use teacher_finder_bot::services::lookup::{
    format_reply, LookupOutcome, TeacherLookup, UNKNOWN_SURNAME,
};
use teacher_finder_bot::utils::markdown::escape_markdown;
use tempfile::TempDir;

/// Helper function to create a test database
async fn create_test_db(temp_dir: &TempDir) -> DatabaseManager {
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}", db_path.display());
    
    let db = DatabaseManager::new(&db_url)
        .await
        .expect("Failed to create test database");
    db.run_migrations().await.expect("Failed to run migrations");
    db
}

const GROUP_A_EXPORT: &str = "\
Unnamed: 0,Unnamed: 1,Unnamed: 2,Unnamed: 3,Unnamed: 4
время,10.мар,время,12.мар,
09:00,\"Лекция  \nПетров П.П.  ауд. 301\",,Семинар Сидоров,
,время,,\"Практикум\nПетров\",
";

const GROUP_B_EXPORT: &str = "\
Unnamed: 0,Unnamed: 1,Unnamed: 2
время,01.05,
13:30,Семинар Петров  ауд. 12,
";

const TEACHERS: &str = "
Петров Пётр Петрович
Сидоров Сидор Сидорович

Дайсуке Котегава
";

/// Writes the files a build run reads and loads the dataset from them.
async fn build_from_files(temp_dir: &TempDir) -> DatabaseManager {
    let schedule_dir = temp_dir.path().join("schedules");
    fs::create_dir_all(&schedule_dir).unwrap();
    fs::write(schedule_dir.join("schedule_Э-101.csv"), GROUP_A_EXPORT).unwrap();
    fs::write(schedule_dir.join("schedule_Э-102.csv"), GROUP_B_EXPORT).unwrap();

    let addresses_path = temp_dir.path().join("addresses.json");
    fs::write(
        &addresses_path,
        r#"{
            "Э-101": {"doc_id": "doc-a", "sheet_id": "0"},
            "Э-102": {"doc_id": "doc-b", "sheet_id": "17"}
        }"#,
    )
    .unwrap();

    let teachers_path = temp_dir.path().join("teachers.txt");
    fs::write(&teachers_path, TEACHERS).unwrap();

    let addresses = load_addresses(&addresses_path).unwrap();
    let classes = load_group_classes(&schedule_dir, &addresses).unwrap();
    let names = load_teacher_names(&teachers_path).unwrap();
    assert_eq!(names.len(), 3);

    let db = create_test_db(temp_dir).await;
    let report = build_dataset(&db, &classes, names).await.unwrap();
    assert_eq!(report.classes, 4);
    assert_eq!(report.teachers, 3);
    db
}

#[tokio::test]
async fn test_group_exports_are_parsed_and_merged() {
    let temp_dir = TempDir::new().unwrap();
    let schedule_dir = temp_dir.path();
    fs::write(schedule_dir.join("schedule_Э-101.csv"), GROUP_A_EXPORT).unwrap();

    let mut addresses = BTreeMap::new();
    addresses.insert(
        "Э-101".to_string(),
        serde_json::from_str(r#"{"doc_id": "doc-a", "sheet_id": "0"}"#).unwrap(),
    );

    let classes = load_group_classes(schedule_dir, &addresses).unwrap();
    let summary: Vec<_> = classes
        .iter()
        .map(|c| (c.day, c.month, c.time.as_str(), c.info.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (10, 3, "09:00", "Лекция Петров П.П. ауд. 301"),
            (12, 3, "09:00", "Семинар Сидоров"),
            (12, 3, "09:00", "Практикум Петров"),
        ]
    );
}

#[tokio::test]
async fn test_missing_export_fails_build_input() {
    let temp_dir = TempDir::new().unwrap();
    let mut addresses = BTreeMap::new();
    addresses.insert(
        "Э-999".to_string(),
        serde_json::from_str(r#"{"doc_id": "x", "sheet_id": "1"}"#).unwrap(),
    );

    let error = load_group_classes(temp_dir.path(), &addresses).unwrap_err();
    assert!(error.to_string().contains("Э-999"));
}

#[tokio::test]
async fn test_exact_surname_lists_upcoming_classes() {
    let temp_dir = TempDir::new().unwrap();
    let db = build_from_files(&temp_dir).await;
    let lookup = TeacherLookup::new(db);

    let outcome = lookup.resolve("Петров", 11, 3).await.unwrap();
    let LookupOutcome::Found { teacher, classes } = &outcome else {
        panic!("expected a match, got {outcome:?}");
    };
    assert_eq!(teacher.full_name, "Петров Пётр Петрович");
    assert_eq!(classes.len(), 2);

    assert_eq!(
        format_reply(&outcome),
        "Преподавателя *Петров Пётр Петрович* можно встретить в следующие дни:\n\
         *12\\.03, 09:00*: Практикум Петров\n\
         *01\\.05, 13:30*: Семинар Петров ауд\\. 12"
    );
}

#[tokio::test]
async fn test_exact_surname_without_upcoming_classes() {
    let temp_dir = TempDir::new().unwrap();
    let db = build_from_files(&temp_dir).await;
    let lookup = TeacherLookup::new(db);

    let outcome = lookup.resolve("Котегава", 1, 3).await.unwrap();
    assert!(matches!(&outcome, LookupOutcome::Found { classes, .. } if classes.is_empty()));

    let reply = format_reply(&outcome);
    assert_eq!(
        reply,
        "К сожалению, не удалось найти, в какие дни можно встретить преподавателя *Котегава Дайсуке*\\."
    );
}

#[tokio::test]
async fn test_misspelled_surname_gets_suggestion() {
    let temp_dir = TempDir::new().unwrap();
    let db = build_from_files(&temp_dir).await;
    let lookup = TeacherLookup::new(db);

    let outcome = lookup.resolve("Петрв", 1, 3).await.unwrap();
    assert_eq!(outcome, LookupOutcome::Suggestions(vec!["Петров".to_string()]));

    let reply = format_reply(&outcome);
    assert!(reply.starts_with(&escape_markdown(UNKNOWN_SURNAME)));
    assert!(reply.contains("*Петров*"));
    assert!(reply.contains("/find"));
}

#[tokio::test]
async fn test_unrecognised_surname() {
    let temp_dir = TempDir::new().unwrap();
    let db = build_from_files(&temp_dir).await;
    let lookup = TeacherLookup::new(db);

    let outcome = lookup.resolve("Неизвестновский", 1, 3).await.unwrap();
    assert_eq!(outcome, LookupOutcome::Unknown);
    assert_eq!(format_reply(&outcome), escape_markdown(UNKNOWN_SURNAME));
}
