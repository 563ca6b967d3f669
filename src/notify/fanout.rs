// src/notify/fanout.rs
use crate::config::Config;
use crate::notify::{DiscordNotifier, Notifier, NotifyOutcome, SlackNotifier, TeamsNotifier};
use tracing::{info, warn};

/// All three channel variants, credentials sourced from configuration only.
/// Used by the composed notify-on-fail path.
pub fn channels_from_config(config: &Config) -> Vec<Box<dyn Notifier>> {
    vec![
        Box::new(SlackNotifier::new(None, None, None, &config.slack)),
        Box::new(DiscordNotifier::new(None, None, None, &config.discord)),
        Box::new(TeamsNotifier::new(None, &config.teams)),
    ]
}

/// Attempt delivery on every channel independently, one task each. A slow
/// or failing channel cannot delay the others beyond its own timeout, and
/// every attempt reports back.
pub async fn fan_out(
    notifiers: Vec<Box<dyn Notifier>>,
    message: String,
) -> Vec<(&'static str, NotifyOutcome)> {
    let mut tasks = Vec::with_capacity(notifiers.len());

    for notifier in notifiers {
        let name = notifier.name();
        let message = message.clone();
        let task = tokio::spawn(async move { notifier.deliver(&message).await });
        tasks.push((name, task));
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    for (name, task) in tasks {
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(channel = name, error = %e, "delivery task failed");
                NotifyOutcome::error("delivery task failed")
            }
        };

        if outcome.ok {
            info!(channel = name, status = ?outcome.status, "notification delivered");
        } else {
            warn!(channel = name, status = ?outcome.status, "notification failed");
        }
        outcomes.push((name, outcome));
    }

    outcomes
}
