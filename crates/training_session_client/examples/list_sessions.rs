use chrono::{Duration, Local};
use training_session_client::{
    TrainingSessionClient, config::Config, http_client::ReqwestTrainingSessionClient,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::from_env()?;
    let client = ReqwestTrainingSessionClient::from_config(&cfg)?;

    let days_back = std::env::var("TRAINING_SESSION_DAYS_BACK")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(7);
    let date_from = Local::now().date_naive() - Duration::days(days_back);

    let sessions = client
        .get_sessions(date_from, "list-sessions-example")
        .await
        .map_err(|e| format!("failed to fetch sessions: {}", e))?;

    if sessions.is_empty() {
        println!("No sessions since {}", date_from.format("%Y%m%d"));
        return Ok(());
    }

    println!("Sessions since {}:", date_from.format("%Y%m%d"));
    for s in sessions {
        let id = s.id.unwrap_or_else(|| "(no id)".to_string());
        let date = s.date.unwrap_or_else(|| "(no date)".to_string());
        match s.time_in_minutes {
            Some(minutes) => println!("- {} on {} ({} min)", id, date, minutes),
            None => println!("- {} on {}", id, date),
        }
    }

    Ok(())
}
