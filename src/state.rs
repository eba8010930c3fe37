//! Application state: problem stores, live playground sessions, module
//! registry, prompts, and the optional assistant client.
//!
//! This module owns:
//!   - the problem catalogue (by id, by module, last-served-by-module)
//!   - the live session map (session id -> adapter-wrapped engine)
//!   - the module registry (explicit value, no global singleton)
//!   - the optional assistant client
//!
//! Problems come from CONTENT_DIR (*.json) when provided; built-in seeds fill
//! the gaps so the app works with zero external content.

use std::{collections::HashMap, sync::Arc};

use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::adapter::EngineAdapter;
use crate::assistant::Assistant;
use crate::config::{load_app_config_from_env, ModuleRegistry, Prompts};
use crate::domain::ProblemDefinition;
use crate::engine::create_engine;
use crate::seeds::{hard_fallback_problem, seed_problems};

#[derive(Clone)]
pub struct AppState {
    pub problems: Arc<RwLock<HashMap<String, Arc<ProblemDefinition>>>>,
    pub by_module: Arc<RwLock<HashMap<String, Vec<String>>>>,
    pub last_by_module: Arc<RwLock<HashMap<String, String>>>,
    pub sessions: Arc<RwLock<HashMap<String, EngineAdapter>>>,
    pub registry: ModuleRegistry,
    pub assistant: Option<Assistant>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from env: load config, load content, seed problems, build
    /// indices, init the assistant client.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_app_config_from_env().unwrap_or_default();
        let registry = ModuleRegistry::build(&cfg.modules);
        let prompts = cfg.prompts;

        let mut id_map = HashMap::<String, Arc<ProblemDefinition>>::new();
        let mut module_map = HashMap::<String, Vec<String>>::new();

        // Content-directory problems first (if any).
        let mut content = 0usize;
        for p in load_content_problems() {
            // Constructibility check up front: a problem the factory rejects
            // is a content error and is skipped, not served.
            if let Err(e) = create_engine(&p.variant, p.clone()) {
                error!(target: "playground", id = %p.id, error = %e, "Skipping content problem: engine construction failed.");
                continue;
            }
            module_map.entry(p.module.clone()).or_default().push(p.id.clone());
            id_map.insert(p.id.clone(), Arc::new(p));
            content += 1;
        }

        // Always insert built-in seeds, but don't overwrite existing ids.
        let mut seeded = 0usize;
        for p in seed_problems() {
            if id_map.contains_key(&p.id) {
                continue;
            }
            module_map.entry(p.module.clone()).or_default().push(p.id.clone());
            id_map.insert(p.id.clone(), Arc::new(p));
            seeded += 1;
        }

        // Inventory summary by module.
        for (module, ids) in &module_map {
            info!(target: "playground", %module, problems = ids.len(), "Startup problem inventory");
        }
        info!(target: "windowlab_backend", from_content = content, from_seeds = seeded, "Problem catalogue loaded");

        let assistant = Assistant::from_env();
        if let Some(a) = &assistant {
            info!(target: "windowlab_backend", base_url = %a.base_url, model = %a.model, "Assistant enabled.");
        } else {
            info!(target: "windowlab_backend", "Assistant disabled (no ASSISTANT_BASE_URL). Using local fallbacks.");
        }

        Self {
            problems: Arc::new(RwLock::new(id_map)),
            by_module: Arc::new(RwLock::new(module_map)),
            last_by_module: Arc::new(RwLock::new(HashMap::new())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            registry,
            assistant,
            prompts,
        }
    }

    /// Insert a problem into both stores.
    #[instrument(level = "debug", skip(self, p), fields(id = %p.id))]
    pub async fn insert_problem(&self, p: ProblemDefinition) {
        let mut problems = self.problems.write().await;
        let mut by_module = self.by_module.write().await;
        by_module.entry(p.module.clone()).or_default().push(p.id.clone());
        problems.insert(p.id.clone(), Arc::new(p));
    }

    /// Read-only access to a problem by id.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_problem(&self, id: &str) -> Option<Arc<ProblemDefinition>> {
        let problems = self.problems.read().await;
        problems.get(id).cloned()
    }

    /// Problem ids for one module, in catalogue order.
    pub async fn problems_for_module(&self, module: &str) -> Vec<Arc<ProblemDefinition>> {
        let by_module = self.by_module.read().await;
        let problems = self.problems.read().await;
        by_module
            .get(module)
            .map(|ids| ids.iter().filter_map(|id| problems.get(id).cloned()).collect())
            .unwrap_or_default()
    }

    /// Practice rotation: serve a problem from the module's pool, avoiding an
    /// immediate repeat of the last one served. Empty pool gets the hard
    /// fallback walkthrough.
    #[instrument(level = "info", skip(self), fields(%module))]
    pub async fn choose_practice(&self, module: &str) -> (Arc<ProblemDefinition>, &'static str) {
        if let Some(ids) = { self.by_module.read().await.get(module).cloned() } {
            if !ids.is_empty() {
                let last = { self.last_by_module.read().await.get(module).cloned() };
                let fresh: Vec<String> = ids
                    .iter()
                    .filter(|id| Some(*id) != last.as_ref())
                    .cloned()
                    .collect();
                let pool = if fresh.is_empty() { ids } else { fresh };
                let chosen_id = pool
                    .choose(&mut rand::thread_rng())
                    .cloned()
                    .unwrap_or_else(|| pool[0].clone());

                if let Some(p) = { self.problems.read().await.get(&chosen_id).cloned() } {
                    self.last_by_module
                        .write()
                        .await
                        .insert(module.to_string(), chosen_id.clone());
                    info!(target: "playground", %module, chosen = %chosen_id, source = "catalogue", "Practice problem served");
                    return (p, "catalogue");
                }
            }
        }

        // Last resort: inject a minimal walkthrough for this module.
        let p = hard_fallback_problem(module.to_string());
        let id = p.id.clone();
        self.insert_problem(p.clone()).await;
        self.last_by_module
            .write()
            .await
            .insert(module.to_string(), id.clone());
        warn!(target: "playground", %module, chosen = %id, source = "hard_fallback", "Inserted hard fallback problem");
        (Arc::new(p), "hard_fallback")
    }

    /// Mount a playground: build an engine for the problem, wrap it, store the
    /// session. Returns the new session id.
    #[instrument(level = "info", skip(self), fields(%problem_id))]
    pub async fn start_session(&self, problem_id: &str) -> Result<String, String> {
        let problem = self
            .get_problem(problem_id)
            .await
            .ok_or_else(|| format!("Unknown problemId: {}", problem_id))?;
        let engine = create_engine(&problem.variant, (*problem).clone())?;
        let adapter = EngineAdapter::new(engine, &self.registry);

        let session_id = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(session_id.clone(), adapter);
        info!(target: "playground", %problem_id, %session_id, "Playground session started");
        Ok(session_id)
    }

    /// Run a closure against one live session. Returns None when the id is
    /// unknown (expired or never existed).
    pub async fn with_session<F, T>(&self, session_id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut EngineAdapter) -> T,
    {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(session_id).map(f)
    }

    /// Unmount a playground session. Idempotent.
    #[instrument(level = "info", skip(self), fields(%session_id))]
    pub async fn end_session(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }
}

/// Read every `*.json` problem document under CONTENT_DIR. Bad files are
/// logged and skipped; they never take the catalogue down.
fn load_content_problems() -> Vec<ProblemDefinition> {
    let dir = match std::env::var("CONTENT_DIR") {
        Ok(d) => d,
        Err(_) => return Vec::new(),
    };
    let entries = match std::fs::read_dir(&dir) {
        Ok(e) => e,
        Err(e) => {
            error!(target: "windowlab_backend", %dir, error = %e, "Failed to read content directory");
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str::<ProblemDefinition>(&s) {
                Ok(p) => {
                    info!(target: "windowlab_backend", path = %path.display(), id = %p.id, "Loaded problem document");
                    out.push(p);
                }
                Err(e) => {
                    error!(target: "windowlab_backend", path = %path.display(), error = %e, "Failed to parse problem document");
                }
            },
            Err(e) => {
                error!(target: "windowlab_backend", path = %path.display(), error = %e, "Failed to read problem document");
            }
        }
    }
    out
}
