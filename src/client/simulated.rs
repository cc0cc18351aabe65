use std::sync::Mutex;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tseries::{FetchError, FetchResult, Reading, SampleSource};

/// Offline stand-in for the sensor backend: uniform readings in `[min, max)`.
pub struct SimulatedSource {
    rng: Mutex<StdRng>,
    min: f64,
    max: f64,
}

impl SimulatedSource {
    pub fn new(min: f64, max: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
            min,
            max,
        }
    }

    fn draw(&self, n: usize) -> FetchResult<Vec<f64>> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| FetchError::Payload("simulated source poisoned".to_string()))?;
        Ok((0..n).map(|_| rng.gen_range(self.min..self.max)).collect())
    }
}

impl SampleSource for SimulatedSource {
    async fn fetch_current(&self) -> FetchResult<Reading> {
        let value = self.draw(1)?[0];
        Ok(Reading {
            value,
            timestamp: Utc::now().timestamp_millis(),
        })
    }

    async fn fetch_history(&self, look_back_seconds: u64) -> FetchResult<Vec<f64>> {
        self.draw(look_back_seconds as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_readings_stay_in_range() {
        let source = SimulatedSource::new(-43.0, -42.0, Some(1));
        for _ in 0..200 {
            let r = source.fetch_current().await.unwrap();
            assert!((-43.0..-42.0).contains(&r.value));
        }
    }

    #[tokio::test]
    async fn test_seed_is_deterministic() {
        let a = SimulatedSource::new(0.0, 1.0, Some(42));
        let b = SimulatedSource::new(0.0, 1.0, Some(42));
        assert_eq!(
            a.fetch_history(16).await.unwrap(),
            b.fetch_history(16).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_history_length() {
        let source = SimulatedSource::new(0.0, 1.0, None);
        assert_eq!(source.fetch_history(3600).await.unwrap().len(), 3600);
        assert!(source.fetch_history(0).await.unwrap().is_empty());
    }
}
