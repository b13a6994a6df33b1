// 工具模块
// 开发心理：只保留被合成引擎实际使用的工具

pub mod random;

pub use random::RandomSource;
