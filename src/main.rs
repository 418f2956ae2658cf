use std::time::Duration;

use anyhow::Result;

use taskcast_core::{App, Config};
use taskcast_tasks::{Priority, TaskDraft};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    taskcast_core::init()?;

    let config = Config::load();
    let mut app = App::new(config)?;

    // Load saved state from the mirror before anything renders
    app.rehydrate();

    tracing::info!("TaskCast application started");

    println!("TaskCast - Task Manager with Weather");
    println!("Data directory: {}", app.config().data_dir.display());

    if !app.auth_state().is_authenticated() {
        let user = app.login("demo").await?;
        println!("Signed in as {}", user.username);
    }

    if app.tasks().is_empty() {
        app.add_task(
            TaskDraft::new("Water the garden")
                .priority(Priority::High)
                .outdoor(true),
        )?;
        app.add_task(TaskDraft::new("Buy milk").priority(Priority::Low))?;
    }

    println!("\nTasks:");
    for task in app.tasks() {
        let mark = if task.completed { "x" } else { " " };
        println!("  [{}] {} ({:?})", mark, task.title, task.priority);
    }

    // Give the mocked forecast a moment to resolve
    app.start_weather();
    tokio::time::sleep(Duration::from_secs(2)).await;

    if let Some(state) = app.weather_state() {
        match state.data {
            Some(snapshot) => println!(
                "\nWeather: {} ({}), {:.0} C in {}, {}",
                snapshot.condition_main,
                snapshot.condition_description,
                snapshot.temperature_c,
                snapshot.location_name,
                snapshot.country_code
            ),
            None => println!("\nWeather: not available yet"),
        }
    }

    for item in app.outdoor_briefing() {
        println!("Outdoor task pending: {}", item.task.title);
    }

    // Graceful shutdown
    app.shutdown().await;

    Ok(())
}
