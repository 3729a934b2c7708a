//! Destinations for generated route code.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::PipelineError;
use crate::template::fill_template;

/// Header written at the top of generated files.
pub const OUTPUT_HEADER: &str = "/* Warn: Do not change this file!!! */\n";

type OutputCallback = Arc<dyn Fn(&str, &str) + Send + Sync>;

/// Where generated routes go.
#[derive(Clone)]
pub enum OutputSink {
    /// Print the generated file to stdout.
    Stdout,
    /// Write the generated file to a path.
    File(PathBuf),
    /// Hand the rendered routes and the template to a callback.
    Callback(OutputCallback),
}

impl fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSink::Stdout => f.write_str("Stdout"),
            OutputSink::File(path) => f.debug_tuple("File").field(path).finish(),
            OutputSink::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl OutputSink {
    /// Create a callback sink.
    pub fn callback(f: impl Fn(&str, &str) + Send + Sync + 'static) -> Self {
        OutputSink::Callback(Arc::new(f))
    }

    /// Sink for an optional output path, stdout when absent.
    pub fn for_output(output: Option<PathBuf>) -> Self {
        match output {
            Some(path) => OutputSink::File(path),
            None => OutputSink::Stdout,
        }
    }

    /// Deliver rendered routes.
    pub async fn emit(&self, rendered: &str, template: &str) -> Result<(), PipelineError> {
        match self {
            OutputSink::Stdout => {
                let content = format!("{}\n", generated_file(rendered, template));
                let mut stdout = tokio::io::stdout();
                let written = async {
                    stdout.write_all(content.as_bytes()).await?;
                    stdout.flush().await
                }
                .await;
                written.map_err(|source| PipelineError::Write {
                    path: PathBuf::from("<stdout>"),
                    source,
                })
            }
            OutputSink::File(path) => fs::write(path, generated_file(rendered, template))
                .await
                .map_err(|source| PipelineError::Write {
                    path: path.clone(),
                    source,
                }),
            OutputSink::Callback(f) => {
                f(rendered, template);
                Ok(())
            }
        }
    }
}

/// Full contents of a generated file.
fn generated_file(rendered: &str, template: &str) -> String {
    format!("{OUTPUT_HEADER}{}", fill_template(template, rendered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_sink_writes_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("routes.js");
        let sink = OutputSink::File(path.clone());

        sink.emit("[]", "export default @routeConfig;").await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "/* Warn: Do not change this file!!! */\nexport default [];"
        );
    }

    #[tokio::test]
    async fn test_callback_sink_receives_raw_parts() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&seen);
        let sink = OutputSink::callback(move |rendered, template| {
            captured
                .lock()
                .unwrap()
                .push((rendered.to_string(), template.to_string()));
        });

        sink.emit("[]", "tpl @routeConfig").await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[("[]".to_string(), "tpl @routeConfig".to_string())]);
    }

    #[tokio::test]
    async fn test_file_sink_missing_directory() {
        let temp = TempDir::new().unwrap();
        let sink = OutputSink::File(temp.path().join("no/such/dir/routes.js"));

        let err = sink.emit("[]", "@routeConfig").await.unwrap_err();
        assert!(matches!(err, PipelineError::Write { .. }));
    }

    #[test]
    fn test_for_output() {
        assert!(matches!(OutputSink::for_output(None), OutputSink::Stdout));
        assert!(matches!(
            OutputSink::for_output(Some(PathBuf::from("r.js"))),
            OutputSink::File(_)
        ));
    }
}
