use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    cp4i-deploy completions bash > ~/.bash_completion.d/cp4i-deploy\n\n\
                  Generate zsh completions:\n    cp4i-deploy completions zsh > ~/.zfunc/_cp4i-deploy\n\n\
                  Generate fish completions:\n    cp4i-deploy completions fish > ~/.config/fish/completions/cp4i-deploy.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
