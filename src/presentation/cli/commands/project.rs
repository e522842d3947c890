use crate::common::result::WtsrcResult;
use crate::domain::entities::project_config::ProjectConfig;
use crate::presentation::cli::OutputFormat;

/// Handler for the project command
pub struct ProjectCommand {
    pub output: OutputFormat,
}

impl ProjectCommand {
    pub fn new(output: OutputFormat) -> Self {
        Self { output }
    }

    pub fn render(&self, project: &ProjectConfig) -> WtsrcResult<String> {
        let rendered = match self.output {
            OutputFormat::Text => project.to_string(),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(project)?;
                json.push('\n');
                json
            }
            OutputFormat::Yaml => serde_yaml::to_string(project)?,
        };
        Ok(rendered)
    }

    pub fn execute(&self, project: &ProjectConfig) -> WtsrcResult<()> {
        print!("{}", self.render(project)?);
        Ok(())
    }
}
