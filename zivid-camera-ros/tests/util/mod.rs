use std::{env, process::Command, thread::sleep, time::Duration};

pub(crate) use child_process_terminator::ChildProcessTerminator;

mod child_process_terminator;

fn rostopic_listing_succeeds() -> bool {
    Command::new("rostopic")
        .arg("list")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn await_roscore() {
    while !rostopic_listing_succeeds() {
        sleep(Duration::from_millis(100));
    }
}

pub(crate) fn run_roscore(port: u16) -> ChildProcessTerminator {
    println!("Running roscore on port: {port}");
    env::set_var("ROS_MASTER_URI", format!("http://localhost:{port}"));
    while !portpicker::is_free(port) {
        println!("Waiting port={port}");
        sleep(Duration::from_millis(100));
    }
    let roscore =
        ChildProcessTerminator::spawn(Command::new("roscore").arg("-p").arg(format!("{port}")));
    await_roscore();
    roscore
}

/// Starts `roscore` on a free port and initializes rosrust against it.
///
/// rosrust can be initialized once per process, so call this once per test
/// binary and keep the returned value alive for as long as the test talks to ROS.
pub(crate) fn run_roscore_and_rosrust_init(init_name: &str) -> ChildProcessTerminator {
    let port = portpicker::pick_unused_port().expect("No ports free");
    let roscore = run_roscore(port);
    zivid_camera_ros::init(init_name);
    roscore
}
