//! Guidance printed for each checklist step.

use std::path::Path;

/// Title of the step that locates the project.
pub const BROWSE_TO_PROJECT: &str = "Browse to project directory";
/// Title of the Yarn installation step.
pub const INSTALL_YARN: &str = "Install Yarn";
/// Title of the Bower installation step.
pub const INSTALL_BOWER: &str = "Install Bower";
/// Title of the legacy install step.
pub const INSTALL_WITH_BOWER: &str = "Install dependencies with Bower";
/// Title of the manifest update step.
pub const UPDATE_MANIFEST: &str = "Update package.json";
/// Title of the components cleanup step.
pub const REMOVE_COMPONENTS: &str = "Remove old components directory";
/// Title of the Yarn install step.
pub const INSTALL_WITH_YARN: &str = "Install dependencies with Yarn";
/// Title of the final cleanup step.
pub const REMOVE_BOWER_FILES: &str = "Remove bower.json and old bower components directory";
/// Title shown once the migration is complete.
pub const DONE: &str = "Done";

/// One step of the migration with the instructions to complete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Short heading.
    pub title: &'static str,
    /// Instructions, one line per entry.
    pub lines: Vec<String>,
}

impl Step {
    fn new(title: &'static str, lines: &[&str]) -> Self {
        Self { title, lines: lines.iter().map(|l| (*l).to_string()).collect() }
    }
}

pub(crate) fn browse_to_project() -> Step {
    Step::new(
        BROWSE_TO_PROJECT,
        &[
            "Current directory does not contain bower.json",
            "",
            "Please browse to directory that contains your project to convert.",
        ],
    )
}

pub(crate) fn install_yarn() -> Step {
    Step::new(
        INSTALL_YARN,
        &[
            "A good first step to migrate to Yarn is installing it!",
            "",
            "Please choose your preferred method:",
            "https://yarnpkg.com/lang/en/docs/install/",
            "",
            "One good way to install it is:",
            "$ npm install -g yarn",
            "",
            "At the end you should be able to confirm Yarn's version with:",
            "$ yarn --version",
            "",
            "THE MINIMUM SUPPORTED VERSION OF YARN IS 1.0.0!",
        ],
    )
}

pub(crate) fn install_bower() -> Step {
    Step::new(
        INSTALL_BOWER,
        &[
            "We cannot drop Bower just yet, we need it to install legacy dependencies.",
            "",
            "As a first step, please install Bower with:",
            "$ npm install -g bower",
            "",
            "...or if your project requires specific version of Bower:",
            "$ npm install -g bower@1.4.x",
            "",
            "At the end you should be able to confirm Bower's version with:",
            "$ bower --version",
        ],
    )
}

pub(crate) fn install_with_bower(components_dir: &Path) -> Step {
    let mut step = Step::new(
        INSTALL_WITH_BOWER,
        &[
            "We need to install dependencies the old way first. Please run:",
            "$ bower install",
            "",
            "At the end you should see some packages in:",
        ],
    );
    step.lines.push(components_dir.display().to_string());
    step
}

pub(crate) fn update_manifest() -> Step {
    Step::new(
        UPDATE_MANIFEST,
        &[
            "Changes need to be made in package.json. Please run following to preview them:",
            "",
            "$ bower-away --diff",
            "",
            "And then apply them by running:",
            "",
            "$ bower-away --apply",
        ],
    )
}

pub(crate) fn remove_components(components: &str) -> Step {
    let mut step =
        Step::new(REMOVE_COMPONENTS, &["Now, please remove original components directory:"]);
    step.lines.push(format!("$ rm -rf {components}"));
    step
}

pub(crate) fn install_with_yarn() -> Step {
    Step::new(
        INSTALL_WITH_YARN,
        &[
            "Now install dependencies again with:",
            "$ yarn",
            "",
            "If you encounter issues during installation, please try:",
            "$ yarn --ignore-engines",
            "",
            "If it also fails, you can try following:",
            "$ yarn --ignore-engines --ignore-scripts && yarn postinstall",
            "",
            "You can use this command from now on to install both npm and bower dependencies!",
        ],
    )
}

pub(crate) fn remove_bower_files() -> Step {
    Step::new(REMOVE_BOWER_FILES, &["As a last step, please remove bower.json and .bowerrc"])
}

pub(crate) fn done() -> Step {
    Step::new(
        DONE,
        &[
            "Your project is now converted to Yarn! Thank you for using Bower!",
            "",
            "You should find all bower components in node_modules/@bower_components",
            "",
            "The postinstall script should also link it to old location of components",
            "",
            "It is advisable to remove postinstall script and point your tools",
            "to point to node_modules/@bower_components instead, though.",
            "",
            "You may also consider creating separate directory for front-end project with separate package.json",
        ],
    )
}
