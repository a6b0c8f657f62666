use crate::options::Options;

const TITLE_TEXT: &str = r"
 +-+-+-+-+-+-+-+-+-+-+-+-+-+-+
 | Create Scaffold-Stylus app |
 +-+-+-+-+-+-+-+-+-+-+-+-+-+-+
";

pub fn render_intro_message() {
    println!("{TITLE_TEXT}");
}

/// Next steps shown once the project is ready.
pub fn outro_message(options: &Options) -> String {
    let mut message = String::from("\nCongratulations! Your project has been scaffolded! 🎉\n\n");
    message.push_str("Next steps:\n\n");
    message.push_str(&format!("  cd {}\n\n", options.project));

    if !options.install {
        message.push_str("\tInstall dependencies & format files\n");
        message.push_str("\tyarn install && yarn format\n\n");
    }

    message.push_str("\tStart the local development node\n\tyarn chain\n\n");
    message.push_str("\tIn a new terminal window, deploy your contracts\n\tyarn deploy\n\n");
    message.push_str("\tIn a new terminal window, start the frontend\n\tyarn start\n\n");
    message.push_str("Thanks for using Scaffold-Stylus 🙏, Happy Building!\n");
    message
}

pub fn render_outro_message(options: &Options) {
    println!("{}", outro_message(options));
}
