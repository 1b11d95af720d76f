use tracing::subscriber::{NoSubscriber, with_default};

/// 在调用边界内丢弃所有 `tracing` 事件后执行 `f`
///
/// 只影响当前线程在 `f` 执行期间产生的事件，不改动进程级的标准输出/标准错误；
/// `f` 返回的错误（以及 panic）照常向外传递。
///
/// # 使用示例
/// ```ignore
/// let (weight, bias, losses) = quiet(|| wrapper.train(&features, &targets))?;
/// ```
pub fn quiet<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    with_default(NoSubscriber::default(), f)
}
