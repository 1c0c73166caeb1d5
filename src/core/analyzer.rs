use std::path::Path;
use std::sync::Arc;

use super::assembler::{ProjectAssembler, ProjectGraphs};
use super::scanner::{ProjectScanner, ProjectSource};
use crate::config::ScanConfig;
use crate::error::Result;
use crate::parsers::common::{SyntaxTreeProvider, TreeSitterProvider};
use crate::parsers::{FileParser, ParsedFile};

/// Scans a project and assembles its file and call graphs.
pub struct ProjectAnalyzer {
    config: ScanConfig,
    scanner: ProjectScanner,
    assembler: ProjectAssembler,
}

impl ProjectAnalyzer {
    pub fn new(config: ScanConfig) -> Self {
        Self::with_provider(config, Arc::new(TreeSitterProvider::new()))
    }

    pub fn with_provider(config: ScanConfig, provider: Arc<dyn SyntaxTreeProvider>) -> Self {
        let parser = FileParser::new(Arc::new(config.registry()), provider);
        Self {
            scanner: ProjectScanner::new(parser).with_parallel(config.parallel),
            assembler: ProjectAssembler::new(),
            config,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn analyze(&self, source: &ProjectSource) -> Result<ProjectGraphs> {
        let report = self.scanner.scan(source, self.config.max_depth)?;
        Ok(self.assembler.assemble(report))
    }

    pub fn parse_file(
        &self,
        path: &Path,
        source: &[u8],
        module_name: Option<&str>,
    ) -> Result<ParsedFile> {
        self.scanner.parser().parse_file(path, source, module_name)
    }
}

impl Default for ProjectAnalyzer {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}
