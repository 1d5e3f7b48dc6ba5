//! Server-Sent Events for live panel updates
//!
//! The stream subscribes to the sample feed and re-renders the stats partial
//! whenever a new sample is published, so every open panel follows the
//! latest poll without its own timer.

use std::convert::Infallible;
use std::pin::Pin;
use std::time::Duration;

use askama::Template;
use async_stream::stream;
use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
};
use futures::Stream;

use crate::stats::StatsDisplay;
use crate::AppState;

use super::panel::StatsPanelTemplate;

type EventStream = Pin<Box<dyn Stream<Item = Result<Event, Infallible>> + Send>>;

/// SSE stream for stats panel updates
pub async fn stats_stream(State(state): State<AppState>) -> Response {
    let mut rx = state.feed.subscribe();
    let show_stats = state.config.panel.show_stats;

    let stream: EventStream = Box::pin(stream! {
        loop {
            let sample = rx.borrow_and_update().clone();
            let template = StatsPanelTemplate {
                stats: StatsDisplay::for_panel(show_stats, sample.as_ref()),
            };

            if let Ok(html) = template.render() {
                yield Ok(Event::default().event("stats").data(html));
            }

            if rx.changed().await.is_err() {
                // Feed dropped; close the stream.
                break;
            }
        }
    });

    Sse::new(stream)
        .keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(15))
                .text("keep-alive"),
        )
        .into_response()
}
