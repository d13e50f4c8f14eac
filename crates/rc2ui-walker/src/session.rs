//! Conversion sessions.

use rc2ui_core::WidgetNode;
use rc2ui_resolver::{ClassNameResolver, CustomWidgetRegistry, MappingResolver};
use rc2ui_rules::{PropertyTranslator, RuleTranslator};

use crate::error::WalkError;
use crate::sink::WriterSink;
use crate::walker::WidgetTreeWalker;

/// A converter configuration plus the custom widget registry shared by
/// every tree converted through it.
///
/// Use one session (and one sink per tree) per conversion run; sessions do
/// not share state with each other.
#[derive(Debug, Clone)]
pub struct ConversionSession<R = MappingResolver, T = RuleTranslator> {
    resolver: R,
    translator: T,
    registry: CustomWidgetRegistry,
    converted: usize,
}

impl Default for ConversionSession {
    fn default() -> Self {
        Self::new(MappingResolver::new(), RuleTranslator::frame_styles())
    }
}

impl<R, T> ConversionSession<R, T>
where
    R: ClassNameResolver,
    T: PropertyTranslator,
{
    pub fn new(resolver: R, translator: T) -> Self {
        Self {
            resolver,
            translator,
            registry: CustomWidgetRegistry::new(),
            converted: 0,
        }
    }

    /// Convert one widget tree into `sink`.
    pub fn convert<S>(&mut self, root: &WidgetNode, sink: &mut S) -> Result<(), WalkError<S::Error>>
    where
        S: WriterSink + ?Sized,
    {
        WidgetTreeWalker::new(&self.resolver, &self.translator).traverse(root, &mut self.registry, sink)?;
        self.converted += 1;
        Ok(())
    }

    /// Custom widgets registered so far in this session.
    pub fn registry(&self) -> &CustomWidgetRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// Number of trees converted successfully.
    pub fn converted(&self) -> usize {
        self.converted
    }

    pub fn into_registry(self) -> CustomWidgetRegistry {
        self.registry
    }
}
