use std::fs::File;
use std::os::fd::{AsRawFd, RawFd};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;

use crate::utils::{SuppressStdoutStderr, suppress_output};

/// 重定向作用于整个进程，相关测试须串行执行
static FD_LOCK: Mutex<()> = Mutex::new(());

/// 描述符指向的文件的 (设备号, inode)
fn identity(fd: RawFd) -> (u64, u64) {
    // SAFETY: stat 结构体全零是合法初值，fstat 只写入该结构体
    let mut stat: libc::stat = unsafe { std::mem::zeroed() };
    assert_eq!(unsafe { libc::fstat(fd, &mut stat) }, 0, "fstat({fd}) 失败");
    (stat.st_dev as u64, stat.st_ino as u64)
}

fn null_identity() -> (u64, u64) {
    let null = File::open("/dev/null").unwrap();
    identity(null.as_raw_fd())
}

fn is_open(fd: RawFd) -> bool {
    unsafe { libc::fcntl(fd, libc::F_GETFD) != -1 }
}

#[test]
fn test_guard_redirects_and_restores() {
    let _lock = FD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let original = (identity(1), identity(2));
    let null = null_identity();

    let guard = SuppressStdoutStderr::new().unwrap().enter().unwrap();
    assert_eq!(identity(1), null);
    assert_eq!(identity(2), null);
    let held = guard.raw_descriptors();
    assert!(held.iter().all(|&fd| is_open(fd)));

    drop(guard);
    assert_eq!((identity(1), identity(2)), original);
    assert!(held.iter().all(|&fd| !is_open(fd)));
}

#[test]
fn test_guard_restores_after_panic() {
    let _lock = FD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let original = (identity(1), identity(2));
    let mut held = [0; 4];

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let guard = SuppressStdoutStderr::new().unwrap().enter().unwrap();
        held = guard.raw_descriptors();
        panic!("屏蔽期间出错");
    }));

    assert!(result.is_err(), "panic 不应被守卫吞掉");
    assert_eq!((identity(1), identity(2)), original);
    assert!(held.iter().all(|&fd| !is_open(fd)));
}

#[test]
fn test_suppress_output_returns_inner_result() {
    let _lock = FD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let original = (identity(1), identity(2));
    let null = null_identity();

    let inner = suppress_output(|| {
        assert_eq!(identity(1), null);
        Err::<(), _>("内部错误")
    })
    .unwrap();

    assert_eq!(inner, Err("内部错误"));
    assert_eq!((identity(1), identity(2)), original);
}
