/*
 * @Author       : 老董
 * @Date         : 2026-02-04
 * @Description  : data 模块单元测试
 *
 * 测试按功能分组：
 * - frame: 表格数据结构
 * - toolbox: 嵌套表格 ⇄ 三维数组
 * - transforms: 各个变换器
 * - pipeline: 变换流水线
 */

mod frame;
mod toolbox;
