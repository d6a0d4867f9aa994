//! sakhi-cli — terminal frontend for the HealthSakhi companion API
//!
//! Talks to the sakhi-server HTTP API the same way the mobile client does:
//! bearer-session auth, localized listings, assistant chat with the
//! translation pass-through applied to non-English replies.
//!
//! # Subcommands
//! - `status`                                 — show server health
//! - `chat <message> [--language <code>]`     — ask the assistant
//! - `remedies [--query] [--category]`        — localized home remedies
//! - `schemes [--query] [--category]`         — localized government schemes
//! - `reminders list|add|complete`            — health reminder tracking

use clap::{Parser, Subcommand};
use sakhi_core::locale::{detect_language, Language};
use serde::Deserialize;

const DEFAULT_SERVER: &str = "http://127.0.0.1:8900";

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "sakhi-cli",
    version,
    about = "HealthSakhi maternal & child health companion — CLI"
)]
struct Cli {
    /// Sakhi HTTP server URL (overrides SAKHI_HTTP_URL env var)
    #[arg(long, env = "SAKHI_HTTP_URL", default_value = DEFAULT_SERVER)]
    server: String,

    /// Bearer session token (overrides SAKHI_SESSION_TOKEN env var)
    #[arg(long, env = "SAKHI_SESSION_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show Sakhi server status
    Status,

    /// Send one message to the assistant
    Chat {
        /// The message to send
        message: String,

        /// Interface language code (en, hi, mr)
        #[arg(short, long, env = "SAKHI_LANGUAGE", default_value = "en")]
        language: String,

        /// User id the conversation history belongs to
        #[arg(long, env = "SAKHI_USER_ID")]
        user: String,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// List WHO-approved home remedies
    Remedies {
        /// Search text (condition, symptoms, category)
        #[arg(short, long)]
        query: Option<String>,

        /// Category tab ("all" selects everything)
        #[arg(short, long)]
        category: Option<String>,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// List government welfare schemes
    Schemes {
        /// Search text (name, description)
        #[arg(short, long)]
        query: Option<String>,

        /// Category tab ("all" selects everything)
        #[arg(short, long)]
        category: Option<String>,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Health reminder tracking
    Reminders {
        #[command(subcommand)]
        command: ReminderCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ReminderCommands {
    /// List reminders grouped by status
    List {
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Create a reminder
    Add {
        /// Child's name
        #[arg(long)]
        child_name: String,

        /// Child's date of birth (YYYY-MM-DD)
        #[arg(long)]
        child_dob: String,

        /// Reminder title (e.g. "MMR dose 1")
        #[arg(long)]
        title: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,

        /// Reminder type
        #[arg(long, default_value = "vaccination")]
        kind: String,

        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },

    /// Mark a reminder completed
    Complete {
        /// Reminder id
        id: String,
    },
}

// ============================================================================
// API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GreetingResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[derive(Debug, Deserialize)]
pub struct RemedyItem {
    pub condition_name: String,
    pub symptoms: String,
    pub remedy_description: String,
    pub who_approved: bool,
    pub category: String,
}

#[derive(Debug, Deserialize)]
struct RemediesResponse {
    remedies: Vec<RemedyItem>,
    count: usize,
}

#[derive(Debug, Deserialize)]
pub struct SchemeItem {
    pub scheme_name: String,
    pub description: String,
    pub benefits: String,
    pub official_website: Option<String>,
    pub category: String,
}

#[derive(Debug, Deserialize)]
struct SchemesResponse {
    schemes: Vec<SchemeItem>,
    count: usize,
}

#[derive(Debug, Deserialize)]
pub struct ReminderItem {
    pub id: String,
    pub child_name: String,
    pub reminder_title: String,
    pub reminder_type: String,
    pub due_date: String,
}

#[derive(Debug, Deserialize)]
struct GroupedRemindersResponse {
    overdue: Vec<ReminderItem>,
    upcoming: Vec<ReminderItem>,
    completed: Vec<ReminderItem>,
}

// ============================================================================
// Output Formatting
// ============================================================================

/// Non-English messages route the reply through the translation
/// pass-through. English replies are printed as-is.
pub fn needs_translation(detected: Language) -> bool {
    detected != Language::En
}

pub fn format_remedy(r: &RemedyItem) -> String {
    let badge = if r.who_approved { " [WHO approved]" } else { "" };
    format!(
        "{} ({}){}\n  Symptoms: {}\n  Remedy:   {}",
        r.condition_name, r.category, badge, r.symptoms, r.remedy_description
    )
}

pub fn format_scheme(s: &SchemeItem) -> String {
    let mut out = format!(
        "{} ({})\n  {}\n  Benefits: {}",
        s.scheme_name, s.category, s.description, s.benefits
    );
    if let Some(site) = &s.official_website {
        out.push_str(&format!("\n  Website:  {}", site));
    }
    out
}

pub fn format_reminder(r: &ReminderItem) -> String {
    format!(
        "{}  {} — {} ({})  #{}",
        r.due_date, r.reminder_title, r.child_name, r.reminder_type, r.id
    )
}

// ============================================================================
// HTTP Client Calls
// ============================================================================

fn make_client() -> anyhow::Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?)
}

/// Send a request, exiting with a readable message on transport failure or
/// a non-success status. The server's `{ "error": … }` body is surfaced.
fn send_checked(req: reqwest::blocking::RequestBuilder, url: &str) -> reqwest::blocking::Response {
    let resp = match req.send() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("sakhi-cli: connection failed to {}: {}", url, e);
            std::process::exit(1);
        }
    };

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v["error"].as_str().map(str::to_string))
            .unwrap_or(body);
        eprintln!("sakhi-cli: server returned {}: {}", status, message);
        std::process::exit(1);
    }

    resp
}

fn authed(
    req: reqwest::blocking::RequestBuilder,
    token: &Option<String>,
) -> reqwest::blocking::RequestBuilder {
    match token {
        Some(t) => req.bearer_auth(t),
        None => req,
    }
}

/// Show the server status by calling GET /health.
fn do_status(server: &str) -> anyhow::Result<()> {
    let client = make_client()?;
    let url = format!("{}/health", server);

    match client.get(&url).send() {
        Ok(r) if r.status().is_success() => {
            let body: serde_json::Value = r.json().unwrap_or_default();
            println!("Sakhi server: {}", body["status"].as_str().unwrap_or("unknown"));
            println!("Version:      {}", body["version"].as_str().unwrap_or("?"));
            println!("PostgreSQL:   {}", body["postgresql"].as_str().unwrap_or("?"));
        }
        Ok(r) => {
            eprintln!("sakhi-cli: server unhealthy (HTTP {})", r.status());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("sakhi-cli: cannot reach {}: {}", url, e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// One chat round: greeting, message, reply, translation pass-through.
/// The request language is detected from the message script, not taken
/// from the preference; the preference decides the translation target.
fn do_chat(
    server: &str,
    token: &Option<String>,
    message: &str,
    language: &str,
    user: &str,
    json_output: bool,
) -> anyhow::Result<()> {
    let client = make_client()?;
    let preferred = Language::from_code(language);
    let detected = detect_language(message, preferred);

    if !json_output {
        let url = format!("{}/assistant/greeting?language={}", server, preferred.code());
        let resp = send_checked(client.get(&url), &url);
        if let Ok(greeting) = resp.json::<GreetingResponse>() {
            println!("Sakhi: {}\n", greeting.message);
        }
    }

    let url = format!("{}/assistant/chat", server);
    let body = serde_json::json!({
        "message": message,
        "language": detected.code(),
        "userId": user,
    });
    let resp = send_checked(authed(client.post(&url), token).json(&body), &url);

    if json_output {
        let raw: serde_json::Value = match resp.json() {
            Ok(v) => v,
            Err(e) => {
                eprintln!("sakhi-cli: failed to parse chat response: {}", e);
                std::process::exit(1);
            }
        };
        println!("{}", serde_json::to_string_pretty(&raw)?);
        return Ok(());
    }

    let chat: ChatResponse = match resp.json() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("sakhi-cli: failed to parse chat response: {}", e);
            std::process::exit(1);
        }
    };

    // Translation targets the preferred language, not the detected one,
    // which may be mixed-script
    let reply = if needs_translation(detected) {
        translate(&client, server, &chat.message, preferred.code())
    } else {
        chat.message
    };

    println!("Sakhi: {}", reply);
    Ok(())
}

/// Translation pass-through. Degrades to the untranslated reply on any
/// failure, like the server does.
fn translate(
    client: &reqwest::blocking::Client,
    server: &str,
    text: &str,
    target_lang: &str,
) -> String {
    let url = format!("{}/translate", server);
    let body = serde_json::json!({ "text": text, "targetLang": target_lang });

    client
        .post(&url)
        .json(&body)
        .send()
        .ok()
        .filter(|r| r.status().is_success())
        .and_then(|r| r.json::<TranslateResponse>().ok())
        .map(|t| t.translated_text)
        .unwrap_or_else(|| text.to_string())
}

fn do_remedies(
    server: &str,
    token: &Option<String>,
    query: Option<&str>,
    category: Option<&str>,
    json_output: bool,
) -> anyhow::Result<()> {
    let client = make_client()?;
    let url = format!("{}/remedies", server);

    let mut params: Vec<(&str, &str)> = Vec::new();
    if let Some(q) = query {
        params.push(("q", q));
    }
    if let Some(c) = category {
        params.push(("category", c));
    }

    let resp = send_checked(authed(client.get(&url), token).query(&params), &url);

    if json_output {
        let raw: serde_json::Value = resp.json()?;
        println!("{}", serde_json::to_string_pretty(&raw)?);
        return Ok(());
    }

    let listing: RemediesResponse = match resp.json() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("sakhi-cli: failed to parse remedies response: {}", e);
            std::process::exit(1);
        }
    };

    if listing.remedies.is_empty() {
        eprintln!("No remedies found");
        return Ok(());
    }
    for remedy in &listing.remedies {
        println!("{}\n", format_remedy(remedy));
    }
    println!("{} remedies", listing.count);
    Ok(())
}

fn do_schemes(
    server: &str,
    token: &Option<String>,
    query: Option<&str>,
    category: Option<&str>,
    json_output: bool,
) -> anyhow::Result<()> {
    let client = make_client()?;
    let url = format!("{}/schemes", server);

    let mut params: Vec<(&str, &str)> = Vec::new();
    if let Some(q) = query {
        params.push(("q", q));
    }
    if let Some(c) = category {
        params.push(("category", c));
    }

    let resp = send_checked(authed(client.get(&url), token).query(&params), &url);

    if json_output {
        let raw: serde_json::Value = resp.json()?;
        println!("{}", serde_json::to_string_pretty(&raw)?);
        return Ok(());
    }

    let listing: SchemesResponse = match resp.json() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("sakhi-cli: failed to parse schemes response: {}", e);
            std::process::exit(1);
        }
    };

    if listing.schemes.is_empty() {
        eprintln!("No schemes found");
        return Ok(());
    }
    for scheme in &listing.schemes {
        println!("{}\n", format_scheme(scheme));
    }
    println!("{} schemes", listing.count);
    Ok(())
}

fn do_reminders_list(server: &str, token: &Option<String>, json_output: bool) -> anyhow::Result<()> {
    let client = make_client()?;
    let url = format!("{}/reminders", server);
    let resp = send_checked(authed(client.get(&url), token), &url);

    if json_output {
        let raw: serde_json::Value = resp.json()?;
        println!("{}", serde_json::to_string_pretty(&raw)?);
        return Ok(());
    }

    let grouped: GroupedRemindersResponse = match resp.json() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("sakhi-cli: failed to parse reminders response: {}", e);
            std::process::exit(1);
        }
    };

    for (heading, group) in [
        ("Overdue", &grouped.overdue),
        ("Upcoming", &grouped.upcoming),
        ("Completed", &grouped.completed),
    ] {
        println!("{} ({})", heading, group.len());
        for reminder in group {
            println!("  {}", format_reminder(reminder));
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn do_reminders_add(
    server: &str,
    token: &Option<String>,
    child_name: &str,
    child_dob: &str,
    title: &str,
    due: &str,
    kind: &str,
    description: Option<&str>,
) -> anyhow::Result<()> {
    let client = make_client()?;
    let url = format!("{}/reminders", server);
    let body = serde_json::json!({
        "childName": child_name,
        "childDob": child_dob,
        "reminderTitle": title,
        "dueDate": due,
        "reminderType": kind,
        "reminderDescription": description,
    });

    let resp = send_checked(authed(client.post(&url), token).json(&body), &url);
    let created: serde_json::Value = resp.json()?;
    println!(
        "Created reminder {} (due {})",
        created["reminder"]["id"].as_str().unwrap_or("?"),
        created["reminder"]["due_date"].as_str().unwrap_or("?"),
    );
    Ok(())
}

fn do_reminders_complete(server: &str, token: &Option<String>, id: &str) -> anyhow::Result<()> {
    let client = make_client()?;
    let url = format!("{}/reminders/{}/complete", server, id);
    let resp = send_checked(authed(client.post(&url), token), &url);
    let updated: serde_json::Value = resp.json()?;
    println!(
        "Completed reminder {} at {}",
        updated["reminder"]["id"].as_str().unwrap_or("?"),
        updated["reminder"]["completed_at"].as_str().unwrap_or("?"),
    );
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    let cli = Cli::parse();
    let server = cli.server.trim_end_matches('/').to_string();
    let token = cli.token;

    let result = match cli.command {
        Commands::Status => do_status(&server),
        Commands::Chat {
            message,
            language,
            user,
            json,
        } => do_chat(&server, &token, &message, &language, &user, json),
        Commands::Remedies {
            query,
            category,
            json,
        } => do_remedies(&server, &token, query.as_deref(), category.as_deref(), json),
        Commands::Schemes {
            query,
            category,
            json,
        } => do_schemes(&server, &token, query.as_deref(), category.as_deref(), json),
        Commands::Reminders { command } => match command {
            ReminderCommands::List { json } => do_reminders_list(&server, &token, json),
            ReminderCommands::Add {
                child_name,
                child_dob,
                title,
                due,
                kind,
                description,
            } => do_reminders_add(
                &server,
                &token,
                &child_name,
                &child_dob,
                &title,
                &due,
                &kind,
                description.as_deref(),
            ),
            ReminderCommands::Complete { id } => do_reminders_complete(&server, &token, &id),
        },
    };

    if let Err(e) = result {
        eprintln!("sakhi-cli: {}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // TEST 1: only English skips the translation pass-through
    // ========================================================================
    #[test]
    fn test_needs_translation() {
        assert!(!needs_translation(Language::En));
        assert!(needs_translation(Language::Hi));
        assert!(needs_translation(Language::Mr));
    }

    // ========================================================================
    // TEST 2: Devanagari input is sent in the preferred Indic language
    // ========================================================================
    #[test]
    fn test_detection_drives_outgoing_language() {
        let preferred = Language::from_code("mr");
        assert_eq!(detect_language("ताप आला आहे", preferred), Language::Mr);
        // Latin input goes out as English even with an Indic preference
        assert_eq!(detect_language("fever since morning", preferred), Language::En);
    }

    // ========================================================================
    // TEST 3: remedy formatting includes the WHO badge only when approved
    // ========================================================================
    #[test]
    fn test_format_remedy_who_badge() {
        let mut remedy = RemedyItem {
            condition_name: "Common Cold".to_string(),
            symptoms: "Runny nose".to_string(),
            remedy_description: "Ginger tea".to_string(),
            who_approved: true,
            category: "cold".to_string(),
        };

        let line = format_remedy(&remedy);
        assert!(line.contains("Common Cold (cold) [WHO approved]"));
        assert!(line.contains("Symptoms: Runny nose"));
        assert!(line.contains("Remedy:   Ginger tea"));

        remedy.who_approved = false;
        assert!(!format_remedy(&remedy).contains("[WHO approved]"));
    }

    // ========================================================================
    // TEST 4: scheme formatting appends the website only when present
    // ========================================================================
    #[test]
    fn test_format_scheme_optional_website() {
        let mut scheme = SchemeItem {
            scheme_name: "PMMVY".to_string(),
            description: "Maternity benefit programme".to_string(),
            benefits: "Rs 5000".to_string(),
            official_website: Some("https://pmmvy.example.gov.in".to_string()),
            category: "maternal".to_string(),
        };

        assert!(format_scheme(&scheme).contains("Website:  https://pmmvy.example.gov.in"));

        scheme.official_website = None;
        assert!(!format_scheme(&scheme).contains("Website:"));
    }

    // ========================================================================
    // TEST 5: reminder line carries due date, title, child and id
    // ========================================================================
    #[test]
    fn test_format_reminder_line() {
        let reminder = ReminderItem {
            id: "7b5c24ab".to_string(),
            child_name: "Aarav".to_string(),
            reminder_title: "MMR dose 1".to_string(),
            reminder_type: "vaccination".to_string(),
            due_date: "2026-08-01".to_string(),
        };

        let line = format_reminder(&reminder);
        assert!(line.starts_with("2026-08-01"));
        assert!(line.contains("MMR dose 1 — Aarav (vaccination)"));
        assert!(line.ends_with("#7b5c24ab"));
    }

    // ========================================================================
    // TEST 6: grouped reminders response deserializes from the API shape
    // ========================================================================
    #[test]
    fn test_grouped_reminders_deserialization() {
        let body = serde_json::json!({
            "overdue": [{
                "id": "a", "child_name": "Aarav", "reminder_title": "MMR dose 1",
                "reminder_type": "vaccination", "due_date": "2026-08-01"
            }],
            "upcoming": [],
            "completed": []
        });

        let grouped: GroupedRemindersResponse = serde_json::from_value(body).unwrap();
        assert_eq!(grouped.overdue.len(), 1);
        assert!(grouped.upcoming.is_empty());
        assert!(grouped.completed.is_empty());
        assert_eq!(grouped.overdue[0].reminder_title, "MMR dose 1");
    }

    // ========================================================================
    // TEST 7: translate response deserializes the camelCase wire field
    // ========================================================================
    #[test]
    fn test_translate_response_field_name() {
        let parsed: TranslateResponse =
            serde_json::from_value(serde_json::json!({ "translatedText": "नमस्ते" })).unwrap();
        assert_eq!(parsed.translated_text, "नमस्ते");
    }
}
