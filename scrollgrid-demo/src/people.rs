//! Simulated people API serving sorted pages.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use scrollgrid_lib::error::LoadError;
use scrollgrid_lib::loader::{BatchLoader, BatchResponse, LoadContext};
use scrollgrid_lib::model::{Alignment, Cell, Column, Row};
use scrollgrid_lib::sort::{SortDirection, SortSpec};

const FIRST_NAMES: &[&str] = &["Justin", "Jared", "Jeff", "Jocelyn", "Jaelyn", "Jerika"];
const LAST_NAMES: &[&str] = &["Barnes", "Lovell", "Bulloch"];

#[derive(Debug, Clone)]
pub struct Person {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
}

impl Person {
    fn to_row(&self) -> Row<Person> {
        Row::new(self.id.to_string(), self.clone()).with_cells([
            Cell::new("firstName", self.first_name.as_str()),
            Cell::new("lastName", self.last_name.as_str()),
            Cell::new("age", self.age),
        ])
    }

    fn compare(&self, other: &Person, sort: &SortSpec) -> Ordering {
        let ordering = match sort.name.as_str() {
            "firstName" => self.first_name.cmp(&other.first_name),
            "lastName" => self.last_name.cmp(&other.last_name),
            "age" => self.age.cmp(&other.age),
            _ => Ordering::Equal,
        };
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("firstName", "First Name").width(100.0),
        Column::new("lastName", "Last Name").width(100.0).sortable(),
        Column::new("age", "Age")
            .width(50.0)
            .sortable()
            .align(Alignment::Right),
    ]
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("simulated outage on request {0}")]
    Outage(u32),
}

/// In-memory stand-in for a paged HTTP endpoint.
pub struct PeopleApi {
    people: Vec<Person>,
    page_size: usize,
    latency: Duration,
    fail_every: Option<u32>,
    requests: AtomicU32,
}

impl PeopleApi {
    pub fn generate(count: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let people = (0..count)
            .map(|id| Person {
                id,
                first_name: FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Justin").to_string(),
                last_name: LAST_NAMES.choose(&mut rng).copied().unwrap_or("Barnes").to_string(),
                age: rng.random_range(0..=100),
            })
            .collect();

        Self {
            people,
            page_size: 30,
            latency: Duration::from_millis(150),
            fail_every: None,
            requests: AtomicU32::new(0),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail every `n`th request to exercise retries.
    pub fn with_outage_every(mut self, n: u32) -> Self {
        self.fail_every = Some(n);
        self
    }

    fn page(&self, context: &LoadContext) -> BatchResponse<Person> {
        let mut sorted: Vec<&Person> = self.people.iter().collect();
        sorted.sort_by(|a, b| {
            context
                .sorts
                .iter()
                .map(|s| a.compare(b, s))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        let end = (context.offset + self.page_size).min(sorted.len());
        let data = sorted
            .get(context.offset..end)
            .unwrap_or_default()
            .iter()
            .map(|p| p.to_row())
            .collect();

        BatchResponse::new(data, end >= sorted.len())
    }
}

#[async_trait]
impl BatchLoader<Person> for PeopleApi {
    async fn load(&self, context: LoadContext) -> Result<BatchResponse<Person>, LoadError> {
        let request = self.requests.fetch_add(1, AtomicOrdering::SeqCst) + 1;
        tokio::time::sleep(self.latency).await;

        if let Some(n) = self.fail_every {
            if request % n == 0 {
                return Err(LoadError::source(ApiError::Outage(request)));
            }
        }

        log::debug!(
            "serving offset {} with sorts {:?} (request {})",
            context.offset,
            context.sorts,
            request
        );
        Ok(self.page(&context))
    }
}
