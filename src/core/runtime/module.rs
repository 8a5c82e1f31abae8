use super::type_info::RuntimeType;
use log::{debug, info};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// A separately developed module whose types are discovered at runtime
pub struct LoadedModule {
    name: String,
    version: String,
    types: Vec<Arc<RuntimeType>>,
}

impl LoadedModule {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            types: Vec::new(),
        }
    }

    /// Publish a type from this module
    pub fn with_type(mut self, runtime_type: Arc<RuntimeType>) -> Self {
        self.types.push(runtime_type);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn types(&self) -> &[Arc<RuntimeType>] {
        &self.types
    }

    /// Find a type by structural name match.
    ///
    /// The simple name is enough; the namespace the type lives in may differ
    /// between versions of the module.
    pub fn find_type(&self, name: &str) -> Option<Arc<RuntimeType>> {
        self.types.iter().find(|t| t.matches_name(name)).cloned()
    }

    /// Whether this module has the given package identity
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl std::fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModule")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("types", &self.types.len())
            .finish()
    }
}

/// The set of modules currently loaded into a process
pub struct ModuleCatalog {
    modules: RwLock<Vec<Arc<LoadedModule>>>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self {
            modules: RwLock::new(Vec::new()),
        }
    }

    /// Register a module, replacing any module with the same name
    pub fn load(&self, module: LoadedModule) -> Arc<LoadedModule> {
        let module = Arc::new(module);
        let mut modules = self.modules.write().unwrap_or_else(PoisonError::into_inner);
        modules.retain(|m| !m.is_named(module.name()));
        modules.push(Arc::clone(&module));
        info!("Loaded module {} {} ({} types)", module.name(), module.version(), module.types().len());
        module
    }

    /// Remove a module by name. Returns whether anything was removed.
    pub fn unload(&self, name: &str) -> bool {
        let mut modules = self.modules.write().unwrap_or_else(PoisonError::into_inner);
        let before = modules.len();
        modules.retain(|m| !m.is_named(name));
        let removed = modules.len() != before;
        if removed {
            debug!("Unloaded module {}", name);
        }
        removed
    }

    /// Find a loaded module by package name (case-insensitive)
    pub fn find(&self, name: &str) -> Option<Arc<LoadedModule>> {
        let modules = self.modules.read().unwrap_or_else(PoisonError::into_inner);
        modules.iter().find(|m| m.is_named(name)).cloned()
    }

    /// All loaded modules, in load order
    pub fn modules(&self) -> Vec<Arc<LoadedModule>> {
        self.modules.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.modules.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ModuleCatalog {
    fn default() -> Self {
        Self::new()
    }
}

static LOADED_MODULES: OnceLock<ModuleCatalog> = OnceLock::new();

/// The process-wide module catalog
pub fn loaded_modules() -> &'static ModuleCatalog {
    LOADED_MODULES.get_or_init(ModuleCatalog::new)
}
