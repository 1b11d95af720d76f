mod quiet;
#[cfg(unix)]
mod suppress;
