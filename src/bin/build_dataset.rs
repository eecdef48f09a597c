use anyhow::{anyhow, Result};
use teacher_finder_bot::config::BuildConfig;
use teacher_finder_bot::database::connection::DatabaseManager;
use teacher_finder_bot::database::models::{ClassSession, Teacher, TeacherClassLink};
use teacher_finder_bot::services::dataset::{
    build_dataset, load_addresses, load_group_classes, load_teacher_names,
};
use teacher_finder_bot::services::download::{download_all, RETRY_DELAY};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teacher_finder_bot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let command = args
        .iter()
        .skip(1)
        .map(|s| s.as_str())
        .find(|s| *s != "--no-download")
        .unwrap_or("build");
    
    match command {
        "build" => run_build(!args.iter().any(|a| a == "--no-download")).await,
        "check" => check_database().await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            print_help();
            std::process::exit(1);
        }
    }
}

async fn run_build(download: bool) -> Result<()> {
    println!("📚 Teacher Finder Bot - Dataset Build");
    println!("=====================================");
    
    dotenvy::dotenv().ok();
    let config = BuildConfig::from_env();
    
    println!("📊 Database URL: {}", config.database_url);
    
    let addresses = load_addresses(&config.addresses_file)?;
    println!("🗂️  {} groups in {}", addresses.len(), config.addresses_file.display());
    
    if download {
        let client = reqwest::Client::new();
        let fetched = download_all(
            &client,
            &config.export_base_url,
            &addresses,
            &config.schedule_dir,
            RETRY_DELAY,
        )
        .await?;
        println!("⬇️  Downloaded {} schedules into {}", fetched, config.schedule_dir.display());
    } else {
        println!("📂 Using existing exports in {}", config.schedule_dir.display());
    }
    
    let classes = load_group_classes(&config.schedule_dir, &addresses)?;
    println!("📅 Parsed {} classes", classes.len());
    
    let teacher_names = load_teacher_names(&config.teachers_file)?;
    println!("👩‍🏫 Read {} teacher names", teacher_names.len());
    
    let db_manager = DatabaseManager::new(&config.database_url).await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;
    db_manager.run_migrations().await?;
    
    let report = build_dataset(&db_manager, &classes, teacher_names).await?;
    
    if report.unparsed_dates > 0 {
        println!("⚠️  {} classes have a header that is not a date", report.unparsed_dates);
    }
    for name in &report.missing_corrections {
        println!("⚠️  Item '{name}' does not exist in the teacher list");
    }
    println!(
        "✅ Database update done: {} classes, {} teachers, {} links",
        report.classes, report.teachers, report.links
    );
    
    Ok(())
}

async fn check_database() -> Result<()> {
    println!("🔍 Checking dataset...");
    
    dotenvy::dotenv().ok();
    let config = BuildConfig::from_env();
    
    let db_manager = DatabaseManager::new(&config.database_url).await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;
    db_manager.run_migrations().await?;
    
    let classes = ClassSession::count(&db_manager.pool).await?;
    let teachers = Teacher::count(&db_manager.pool).await?;
    let links = TeacherClassLink::count(&db_manager.pool).await?;
    
    println!("📋 classes: {classes}");
    println!("📋 teachers: {teachers}");
    println!("📋 teacher_class_links: {links}");
    if teachers == 0 {
        println!("💡 Run 'build-dataset build' to fill the database");
    }
    
    Ok(())
}

fn print_help() {
    println!("📚 Teacher Finder Bot - Dataset Build Tool");
    println!();
    println!("USAGE:");
    println!("    build-dataset [COMMAND] [--no-download]");
    println!();
    println!("COMMANDS:");
    println!("    build          Download exports, then rebuild classes, teachers and links (default)");
    println!("                   --no-download parses the exports already in SCHEDULE_DIR");
    println!("    check          Show row counts of the current dataset");
    println!("    help           Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    DATABASE_URL     Database connection string (default: sqlite:./data/teachers.db)");
    println!("    ADDRESSES_FILE   Group to spreadsheet map (default: addresses.json)");
    println!("    SCHEDULE_DIR     Directory with schedule_<group>.csv exports (default: ./data/schedules)");
    println!("    TEACHERS_FILE    Teacher names, one per line (default: ./data/teachers.txt)");
    println!("    EXPORT_BASE_URL  Spreadsheet service root (default: https://docs.google.com/spreadsheets)");
    println!();
}
