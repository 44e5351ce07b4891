use std::fmt;
use derive_more::*;
use crate::LoadError;

/**
 * Deconstructed path to a file.
 */
#[derive(Clone, Eq, PartialEq, Default, Debug, Hash)]
pub struct AssetPath {
    pub protocol: String,
    pub prefix: Option<String>,
    pub body: String,
    pub extension: String,
}

impl AssetPath {

    pub fn parse(path: &str, default_protocol: Option<&str>) -> Result<Self, LoadError> {
        let protocol: Option<&str>;
        let body: &str;
        let extension: &str;
        let mut remainder = path;

        // Reads protocol
        match remainder.split_once("://") {
            Some((left, right)) => {
                protocol = Some(left);
                remainder = right;
            },
            None => protocol = None,
        };
        let Some(protocol) = protocol.or(default_protocol) else {
            return Err(LoadError::NoDefaultProtocol)
        };

        // Reads body and extension.
        // Only the final segment may carry the extension, so "../img/a.png" keeps its dots.
        let file_start = remainder.rfind('/').map(|idx| idx + 1).unwrap_or(0);
        match remainder[file_start..].rfind('.') {
            Some(dot) if dot > 0 => {
                let split = file_start + dot;
                body = &remainder[..split];
                extension = &remainder[split + 1..];
            },
            _ => return Err(LoadError::PathMissingExtension),
        };
        if extension.is_empty() {
            return Err(LoadError::PathMissingExtension);
        }

        Ok(Self {
            protocol: protocol.into(),
            prefix: None,
            body: body.into(),
            extension: extension.into()
        })
    }

    /// Body and extension. No protocol.
    pub fn without_protocol(&self) -> String {
        match self.prefix.as_deref() {
            Some(prefix) => format!("{}/{}.{}", prefix, self.body, self.extension),
            None => format!("{}.{}", self.body, self.extension),
        }
    }

    /// Parent directory of this file, without protocol or prefix.
    /// None if it's at the root.
    pub fn parent(&self) -> Option<String> {
        let (parent, _) = self.body.rsplit_once('/')?;
        if parent.is_empty() {
            return Some(String::from("/"));
        }
        Some(String::from(parent))
    }

    /// Resolves a path relative to the directory this file lives in.
    pub fn sibling(&self, relative: &str) -> String {
        join_relative(self.parent().as_deref(), relative)
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix.as_deref() {
            Some(prefix) => write!(f, "{}://{}/{}.{}", self.protocol, prefix, self.body, self.extension),
            None => write!(f, "{}://{}.{}", self.protocol, self.body, self.extension),
        }
    }
}

/// Joins a relative path onto a parent directory, collapsing "." and ".." segments.
/// ".." segments that climb above a relative parent are kept, and dropped at the root of an absolute one.
pub fn join_relative(parent: Option<&str>, relative: &str) -> String {
    let absolute = parent.map_or(false, |parent| parent.starts_with('/'));
    let mut segments: Vec<&str> = Vec::new();
    let parent_segments = parent.into_iter().flat_map(|parent| parent.split('/'));
    for segment in parent_segments.chain(relative.split('/')) {
        match segment {
            "" | "." => {},
            ".." => match segments.last() {
                Some(&last) if last != ".." => { segments.pop(); },
                _ if absolute => {},
                _ => segments.push(".."),
            },
            _ => segments.push(segment),
        }
    }
    let joined = segments.join("/");
    if absolute { format!("/{joined}") } else { joined }
}

/// Checks that a path is a well-formed relative file reference.
/// Says nothing about whether the file exists.
pub fn validate_relative(path: &str) -> Result<(), PathSyntaxError> {
    if path.trim().is_empty() {
        return Err(PathSyntaxError::Empty);
    }
    if path.chars().any(char::is_control) {
        return Err(PathSyntaxError::ControlCharacter);
    }
    if path.contains('\\') {
        return Err(PathSyntaxError::Backslash);
    }
    if path.starts_with('/') || path.contains("://") {
        return Err(PathSyntaxError::Absolute);
    }
    if path.ends_with('/') {
        return Err(PathSyntaxError::Directory);
    }
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < file_name.len() => Ok(()),
        _ => Err(PathSyntaxError::MissingExtension),
    }
}

#[derive(Error, Display, Copy, Clone, Eq, PartialEq, Debug)]
pub enum PathSyntaxError {
    #[display(fmt="path is empty")]
    Empty,
    #[display(fmt="path contains a control character")]
    ControlCharacter,
    #[display(fmt="path contains a backslash")]
    Backslash,
    #[display(fmt="path is absolute")]
    Absolute,
    #[display(fmt="path names a directory")]
    Directory,
    #[display(fmt="path is missing an extension")]
    MissingExtension,
}
