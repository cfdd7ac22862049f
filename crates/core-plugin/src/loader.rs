use crate::Plugin;

/// Produces ready-made plugin instances for the host.
pub trait PluginLoader {
    fn name(&self) -> &str;
    fn discover(&mut self) -> Vec<Box<dyn Plugin>>;
}

pub type PluginConstructor = Box<dyn Fn() -> Box<dyn Plugin>>;

/// Loader over plugins compiled into the binary.
#[derive(Default)]
pub struct StaticLoader {
    constructors: Vec<PluginConstructor>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, constructor: F) -> Self
    where
        F: Fn() -> Box<dyn Plugin> + 'static,
    {
        self.constructors.push(Box::new(constructor));
        self
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl PluginLoader for StaticLoader {
    fn name(&self) -> &str {
        "static"
    }

    /// Builds a fresh instance per constructor, in registration order.
    fn discover(&mut self) -> Vec<Box<dyn Plugin>> {
        self.constructors.iter().map(|make| make()).collect()
    }
}
