/// This module provides a JSON item reader and writer.
pub mod json;

/// This module provides an XML item writer.
pub mod xml;

/// Persistence of serialized text to the filesystem.
pub mod file;
