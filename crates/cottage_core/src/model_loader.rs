//! Background model loading
//!
//! [`ModelLoader`] owns a worker thread that imports OBJ files and sends the
//! meshes back over a channel. The worker never sees the world; results are
//! polled and inserted on the main thread.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

use crate::asset_error::AssetError;
use crate::mesh::Mesh;
use crate::obj::import_obj;
use crate::Transform;

/// Request to import a model in the background
struct LoadRequest {
    path: PathBuf,
    placement: Transform,
}

/// Result of a background model import
pub struct ModelLoadResult {
    /// Path that was requested
    pub path: PathBuf,
    /// Where the model should be placed in the world
    pub placement: Transform,
    /// The imported mesh or error
    pub result: Result<Mesh, AssetError>,
}

/// Background model loader using a dedicated worker thread
///
/// # Example
/// ```ignore
/// let loader = ModelLoader::new();
/// loader.load_async("textures/houses.obj", Transform::from_position(Vec3::new(0.0, -4.0, 0.0)));
///
/// // Later, once per frame:
/// for loaded in loader.poll_all() {
///     match loaded.result {
///         Ok(mesh) => { /* insert into the world */ }
///         Err(e) => log::warn!("{}", e),
///     }
/// }
/// ```
pub struct ModelLoader {
    sender: Sender<LoadRequest>,
    receiver: Receiver<ModelLoadResult>,
    pending: usize,
}

impl ModelLoader {
    /// Create a loader with a background worker thread
    ///
    /// The worker exits once the loader is dropped.
    pub fn new() -> Self {
        let (request_tx, request_rx) = channel::<LoadRequest>();
        let (result_tx, result_rx) = channel::<ModelLoadResult>();

        thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                let result = import_obj(&request.path);
                let loaded = ModelLoadResult {
                    path: request.path,
                    placement: request.placement,
                    result,
                };
                if result_tx.send(loaded).is_err() {
                    break;
                }
            }
        });

        Self {
            sender: request_tx,
            receiver: result_rx,
            pending: 0,
        }
    }

    /// Request a model to be imported in the background
    pub fn load_async(&mut self, path: impl Into<PathBuf>, placement: Transform) {
        let path = path.into();
        log::debug!("Queueing model load: {}", path.display());
        if self.sender.send(LoadRequest { path, placement }).is_ok() {
            self.pending += 1;
        }
    }

    /// Number of requests that have not produced a result yet
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Check for one finished import (non-blocking)
    pub fn poll(&mut self) -> Option<ModelLoadResult> {
        match self.receiver.try_recv() {
            Ok(result) => {
                self.pending = self.pending.saturating_sub(1);
                Some(result)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Collect every import finished so far (non-blocking)
    pub fn poll_all(&mut self) -> Vec<ModelLoadResult> {
        let mut results = Vec::new();
        while let Some(result) = self.poll() {
            results.push(result);
        }
        results
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cottage_math::Vec3;
    use std::time::{Duration, Instant};

    fn wait_for(loader: &mut ModelLoader, count: usize) -> Vec<ModelLoadResult> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut results = Vec::new();
        while results.len() < count && Instant::now() < deadline {
            results.extend(loader.poll_all());
            std::thread::sleep(Duration::from_millis(5));
        }
        results
    }

    #[test]
    fn test_poll_returns_none_when_empty() {
        let mut loader = ModelLoader::new();
        assert!(loader.poll().is_none());
        assert!(loader.poll_all().is_empty());
        assert_eq!(loader.pending(), 0);
    }

    #[test]
    fn test_missing_file_reports_error() {
        let mut loader = ModelLoader::default();
        let placement = Transform::from_position(Vec3::new(0.0, -4.0, 0.0));
        loader.load_async("/nonexistent/houses.obj", placement);
        assert_eq!(loader.pending(), 1);

        let results = wait_for(&mut loader, 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].placement, placement);
        assert!(matches!(results[0].result, Err(AssetError::NotFound(_))));
        assert_eq!(loader.pending(), 0);
    }

    #[test]
    fn test_loads_real_file() {
        let path = std::env::temp_dir().join(format!("cottage_loader_{}.obj", std::process::id()));
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        let mut loader = ModelLoader::new();
        loader.load_async(&path, Transform::identity());
        let results = wait_for(&mut loader, 1);
        std::fs::remove_file(&path).ok();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, path);
        let mesh = results[0].result.as_ref().unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_multiple_requests_arrive_in_order() {
        let mut loader = ModelLoader::new();
        loader.load_async("/nonexistent/a.obj", Transform::identity());
        loader.load_async("/nonexistent/b.obj", Transform::identity());

        let results = wait_for(&mut loader, 2);
        let names: Vec<_> = results.iter().map(|r| r.path.clone()).collect();
        assert_eq!(names, vec![PathBuf::from("/nonexistent/a.obj"), PathBuf::from("/nonexistent/b.obj")]);
    }
}
