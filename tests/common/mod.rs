//! Shared test doubles: a scripted POI provider with a call counter.

use async_trait::async_trait;
use roam::{BoundingBox, LatLng, Poi, PoiProvider, RoamError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub enum Script {
    Pois(Vec<Poi>),
    Empty,
    Fail,
}

/// Returns scripted responses front to back; once the script runs out,
/// every further call yields an empty list.
pub struct ScriptedProvider {
    script: Mutex<Vec<Script>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Script>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PoiProvider for ScriptedProvider {
    async fn fetch_pois(&self, _bounds: BoundingBox) -> Result<Vec<Poi>, RoamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut script = self.script.lock().unwrap();
        let next = if script.is_empty() {
            Script::Empty
        } else {
            script.remove(0)
        };
        match next {
            Script::Pois(pois) => Ok(pois),
            Script::Empty => Ok(Vec::new()),
            Script::Fail => Err(RoamError::Provider("scripted failure".to_string())),
        }
    }
}

#[allow(dead_code)]
pub fn poi(id: &str, lat: f64, lng: f64) -> Poi {
    Poi {
        id: id.to_string(),
        name: format!("poi {}", id),
        category: "cafe".to_string(),
        position: LatLng::new(lat, lng),
    }
}
