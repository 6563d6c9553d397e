// keep in sync with the greenhouse backend routes
use anyhow::Result;
use common::req::*;
use reqwest::header::ACCEPT;
use serde::{de::DeserializeOwned, Serialize};

use crate::config;

fn api_url(endpoint: &str) -> String {
    config::join(&config::api_base_url(), endpoint)
}

async fn get<T: DeserializeOwned>(endpoint: &str) -> Result<T> {
    log::debug!("GET {endpoint}");
    let client = reqwest::Client::new();

    Ok(client
        .get(api_url(endpoint))
        .header(ACCEPT, "application/json")
        .send()
        .await?
        .error_for_status()?
        .json::<T>()
        .await?)
}

fn body_log<B: Serialize>(body: &B) -> String {
    serde_json::to_string(body).unwrap_or_default()
}

async fn post<B: Serialize>(endpoint: &str, body: &B) -> Result<reqwest::Response> {
    log::debug!("POST {endpoint} {}", body_log(body));
    let client = reqwest::Client::new();

    Ok(client
        .post(api_url(endpoint))
        .header(ACCEPT, "application/json")
        .json(body)
        .send()
        .await?
        .error_for_status()?)
}

async fn put<B: Serialize>(endpoint: &str, body: &B) -> Result<()> {
    log::debug!("PUT {endpoint} {}", body_log(body));
    let client = reqwest::Client::new();

    client
        .put(api_url(endpoint))
        .header(ACCEPT, "application/json")
        .json(body)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

async fn delete(endpoint: &str) -> Result<()> {
    log::debug!("DELETE {endpoint}");
    let client = reqwest::Client::new();

    client
        .delete(api_url(endpoint))
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

// presets

pub async fn presets() -> Result<Vec<Preset>> {
    get("preset").await
}

pub async fn create_preset(preset: &Preset) -> Result<()> {
    post("preset", preset).await?;
    Ok(())
}

pub async fn update_preset(id: i32, preset: &Preset) -> Result<()> {
    put(&format!("preset/{id}"), preset).await
}

pub async fn delete_preset(id: i32) -> Result<()> {
    delete(&format!("preset/{id}")).await
}

pub async fn current_preset() -> Result<Preset> {
    get("current-preset").await
}

pub async fn set_current_preset(id: i32) -> Result<()> {
    post("current-preset", &CurrentPresetRequest { id }).await?;
    Ok(())
}

// measurements

pub fn measurements_endpoint(kind: SensorType, current: bool) -> String {
    if current {
        format!("measurements/{}?current=true", kind.path())
    } else {
        format!("measurements/{}", kind.path())
    }
}

pub async fn measurements(kind: SensorType, current: bool) -> Result<Vec<Measurement>> {
    get(&measurements_endpoint(kind, current)).await
}

/// Latest sample of a sensor, `None` if the backend has none yet.
pub async fn current_measurement(kind: SensorType) -> Result<Option<Measurement>> {
    Ok(measurements(kind, true).await?.into_iter().next())
}

// watering

pub async fn watering_state() -> Result<WateringState> {
    get("watering-system/toggle").await
}

pub async fn run_watering(minutes: u32) -> Result<()> {
    post(
        "watering-system/toggle",
        &ToggleWatering {
            state: true,
            duration: minutes,
        },
    )
    .await?;
    Ok(())
}

pub async fn schedule() -> Result<Vec<Interval>> {
    get("schedule").await
}

/// Returns the created intervals with their ids.
pub async fn add_intervals(intervals: &[CreateInterval]) -> Result<Vec<Interval>> {
    Ok(post("schedule", &intervals).await?.json::<Vec<Interval>>().await?)
}

pub async fn update_interval(interval: &Interval) -> Result<()> {
    put(&format!("schedule/{}", interval.id), interval).await
}

pub async fn delete_interval(id: i32) -> Result<()> {
    delete(&format!("schedule/{id}")).await
}

// settings

pub async fn email() -> Result<EmailDto> {
    get("email").await
}

pub async fn set_email(email: String) -> Result<()> {
    post("email", &EmailDto { email }).await?;
    Ok(())
}
