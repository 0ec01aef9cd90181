use std::process::ExitCode;

fn main() -> ExitCode {
    match yolo2coco::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", yolo2coco::render_error_chain(&err));
            ExitCode::FAILURE
        }
    }
}
