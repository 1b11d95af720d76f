/*
 * @Author       : 老董
 * @Date         : 2026-02-08
 * @Description  : 文件描述符级别的标准输出/标准错误屏蔽
 *
 * 用于屏蔽原生库（C/Fortran 等）直接写到 fd 1/2 的输出，这类输出绕过了
 * `tracing`，`quiet` 管不到。重定向作用于整个进程，不能与其他线程并发使用。
 */

use std::fs::File;
use std::io::{self, Write};
use std::os::fd::{AsFd, AsRawFd, OwnedFd, RawFd};

use tracing::warn;

const STDOUT: RawFd = 1;
const STDERR: RawFd = 2;

fn dup2(src: &OwnedFd, dst: RawFd) -> io::Result<()> {
    // SAFETY: src 是有效的已打开描述符，dup2 不接管它的所有权
    if unsafe { libc::dup2(src.as_raw_fd(), dst) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

fn flush_std() {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
}

/// 屏蔽所需的四个描述符：两个空设备 + 原 stdout/stderr 的副本
///
/// # 使用示例
/// ```ignore
/// {
///     let _guard = SuppressStdoutStderr::new()?.enter()?;
///     noisy_native_call(); // ← 期间写到 fd 1/2 的内容全部丢弃
/// } // ← 离开作用域（包括 panic 展开）时恢复 fd 1/2，并关闭全部四个描述符
/// ```
#[derive(Debug)]
pub struct SuppressStdoutStderr {
    null_fds: [OwnedFd; 2],
    save_fds: [OwnedFd; 2],
}

impl SuppressStdoutStderr {
    /// 打开两个空设备描述符，并复制当前的 fd 1/2
    pub fn new() -> io::Result<Self> {
        let open_null = || -> io::Result<OwnedFd> {
            let file = File::options().read(true).write(true).open("/dev/null")?;
            Ok(OwnedFd::from(file))
        };
        Ok(Self {
            null_fds: [open_null()?, open_null()?],
            save_fds: [
                io::stdout().as_fd().try_clone_to_owned()?,
                io::stderr().as_fd().try_clone_to_owned()?,
            ],
        })
    }

    /// 把 fd 1/2 重定向到空设备，返回负责恢复的守卫
    pub fn enter(self) -> io::Result<SuppressGuard> {
        flush_std();
        dup2(&self.null_fds[0], STDOUT)?;
        if let Err(err) = dup2(&self.null_fds[1], STDERR) {
            let _ = dup2(&self.save_fds[0], STDOUT);
            return Err(err);
        }
        Ok(SuppressGuard { fds: self })
    }
}

/// 屏蔽期间持有的守卫，析构时恢复 fd 1/2 并关闭全部描述符
#[derive(Debug)]
pub struct SuppressGuard {
    fds: SuppressStdoutStderr,
}

impl SuppressGuard {
    #[cfg(test)]
    pub(crate) fn raw_descriptors(&self) -> [RawFd; 4] {
        [
            self.fds.null_fds[0].as_raw_fd(),
            self.fds.null_fds[1].as_raw_fd(),
            self.fds.save_fds[0].as_raw_fd(),
            self.fds.save_fds[1].as_raw_fd(),
        ]
    }
}

impl Drop for SuppressGuard {
    fn drop(&mut self) {
        flush_std();
        for (saved, target) in self.fds.save_fds.iter().zip([STDOUT, STDERR]) {
            if let Err(err) = dup2(saved, target) {
                warn!(fd = target, %err, "恢复标准输出/标准错误失败");
            }
        }
        // 四个 OwnedFd 随 self.fds 一并关闭
    }
}

/// 屏蔽 fd 1/2 后执行 `f`
///
/// `f` 的返回值（包括其中的错误）原样返回；`Err` 只表示屏蔽本身没能建立。
pub fn suppress_output<F, R>(f: F) -> io::Result<R>
where
    F: FnOnce() -> R,
{
    let _guard = SuppressStdoutStderr::new()?.enter()?;
    Ok(f())
}
