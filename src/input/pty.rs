use std::ffi::CStr;
use std::fs::{File, OpenOptions};
use std::os::unix::io::FromRawFd;

/// Open a pseudo-terminal pair: (master, slave)
pub fn open_pty() -> (File, File) {
    unsafe {
        let master = libc::posix_openpt(libc::O_RDWR | libc::O_NOCTTY);
        assert!(master >= 0, "posix_openpt failed");
        assert_eq!(libc::grantpt(master), 0);
        assert_eq!(libc::unlockpt(master), 0);

        let mut name = [0 as libc::c_char; 128];
        assert_eq!(libc::ptsname_r(master, name.as_mut_ptr(), name.len()), 0);
        let path = CStr::from_ptr(name.as_ptr()).to_string_lossy().into_owned();

        let slave = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .expect("open pty slave");
        (File::from_raw_fd(master), slave)
    }
}

/// Local mode flags of the terminal behind `fd`
pub fn lflag(fd: i32) -> libc::tcflag_t {
    let mut t: libc::termios = unsafe { std::mem::zeroed() };
    assert_eq!(unsafe { libc::tcgetattr(fd, &mut t) }, 0);
    t.c_lflag
}
