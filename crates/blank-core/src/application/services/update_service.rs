//! Update Service - the config patch pipeline.
//!
//! 1. Load every fragment and build the patch sources
//! 2. Decode the target
//! 3. Merge the sources into it, left to right
//! 4. Encode the result
//!
//! Nothing is written: the caller gets the encoded bytes back. A failure at
//! any step aborts the whole run.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{DocumentCodec, FileReader},
    },
    domain::{
        Document, Format, FragmentRef, PatchSource, PatchSpec, Target, format_tokens,
        resolve_formats,
    },
    error::{BlankError, BlankResult},
};

/// Everything `apply` needs, with fragments already loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub target: PathBuf,
    /// Forces the target's format instead of inferring it.
    pub input: Option<Format>,
    /// Output format; falls back to `input`, then JSON.
    pub output: Option<Format>,
    pub sources: Vec<PatchSource>,
}

impl UpdateRequest {
    pub fn output_format(&self) -> Format {
        self.output.or(self.input).unwrap_or_default()
    }
}

/// The update pipeline.
pub struct UpdateService {
    codec: Box<dyn DocumentCodec>,
    reader: Box<dyn FileReader>,
}

impl UpdateService {
    pub fn new(codec: Box<dyn DocumentCodec>, reader: Box<dyn FileReader>) -> Self {
        Self { codec, reader }
    }

    /// Load and decode every fragment, in order.
    ///
    /// Inline fragments are JSON. `@file` fragments are decoded by their
    /// extension, JSON when it is not recognised.
    #[instrument(skip_all, fields(count = specs.len()))]
    pub fn prepare(&self, specs: &[PatchSpec]) -> BlankResult<Vec<PatchSource>> {
        specs
            .iter()
            .enumerate()
            .map(|(i, spec)| self.prepare_one(i + 1, spec))
            .collect()
    }

    fn prepare_one(&self, ordinal: usize, spec: &PatchSpec) -> BlankResult<PatchSource> {
        let value = self.load_fragment(ordinal, &spec.fragment)?;

        let source = PatchSource::new(ordinal, &spec.path, value, spec.flags.iter().copied())
            .map_err(|source| ApplicationError::InvalidFragment { ordinal, source })?;

        debug!(
            ordinal,
            path = %source.path(),
            strategy = %source.strategy(),
            "Patch source prepared"
        );
        Ok(source)
    }

    fn load_fragment(&self, ordinal: usize, fragment: &FragmentRef) -> BlankResult<Document> {
        let (format, bytes) = match fragment {
            FragmentRef::Inline(text) => (Format::Json, text.as_bytes().to_vec()),
            FragmentRef::File(path) => {
                let bytes = self.reader.read(path).map_err(|e| {
                    ApplicationError::FragmentRead {
                        ordinal,
                        path: path.clone(),
                        reason: io_reason(e),
                    }
                })?;
                (Format::from_path(path).unwrap_or_default(), bytes)
            }
        };

        self.codec.decode(format, &bytes).map_err(|e| {
            ApplicationError::FragmentDecode {
                ordinal,
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Read and decode the target.
    ///
    /// The format is `hint` when given, else inferred from the extension.
    /// Unknown formats fail before the file is touched. A null document
    /// (an empty YAML file) counts as an empty mapping.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn load_target(&self, path: &Path, hint: Option<Format>) -> BlankResult<Target> {
        let formats = resolve_formats(&format_tokens(path, hint))?;

        let bytes = self
            .reader
            .read(path)
            .map_err(|e| ApplicationError::TargetRead {
                path: path.to_path_buf(),
                reason: io_reason(e),
            })?;

        let mut last_error = None;
        for format in formats {
            match self.codec.decode(format, &bytes) {
                Ok(document) => return accept_target(path, format, document),
                Err(e) => {
                    debug!(%format, error = %e, "Decoder rejected target");
                    last_error = Some(e);
                }
            }
        }

        Err(ApplicationError::TargetDecode {
            path: path.to_path_buf(),
            reason: last_error.map_or_else(|| "no decoder matched".to_owned(), |e| e.message),
        }
        .into())
    }

    /// Decode the target, apply every source in order and encode the result.
    #[instrument(
        skip_all,
        fields(target = %request.target.display(), sources = request.sources.len())
    )]
    pub fn apply(&self, request: UpdateRequest) -> BlankResult<Vec<u8>> {
        let output = request.output_format();
        let mut target = self.load_target(&request.target, request.input)?;
        debug!(format = %target.format(), "Target loaded");

        target.apply(request.sources)?;

        let bytes = self
            .codec
            .encode(output, target.document())
            .map_err(|e| ApplicationError::Encode {
                format: output,
                reason: e.message,
            })?;

        debug!(%output, bytes = bytes.len(), "Document encoded");
        Ok(bytes)
    }

    /// `prepare` followed by `apply`.
    pub fn run(
        &self,
        target: impl AsRef<Path>,
        input: Option<Format>,
        output: Option<Format>,
        specs: &[PatchSpec],
    ) -> BlankResult<Vec<u8>> {
        let sources = self.prepare(specs)?;
        self.apply(UpdateRequest {
            target: target.as_ref().to_path_buf(),
            input,
            output,
            sources,
        })
    }
}

fn accept_target(path: &Path, format: Format, document: Document) -> BlankResult<Target> {
    let document = match document {
        Document::Mapping(_) => document,
        doc if doc.is_null() => Document::empty_mapping(),
        other => {
            return Err(ApplicationError::TargetDecode {
                path: path.to_path_buf(),
                reason: format!("top-level value must be a mapping (got {})", other.kind()),
            }
            .into());
        }
    };

    Ok(Target::new(path, format, document))
}

/// Strip the reader's own path prefix so messages don't repeat it.
fn io_reason(err: BlankError) -> String {
    match err {
        BlankError::Application(ApplicationError::FilesystemError { reason, .. }) => reason,
        other => other.to_string(),
    }
}
