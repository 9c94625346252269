pub mod binary_heap;
pub mod d_heap;
pub mod fibonacci_heap;
pub mod lazy_heap;
pub mod priority_queue;
pub mod radix_heap;

pub use binary_heap::BinaryHeap;
pub use d_heap::DHeap;
pub use fibonacci_heap::FibonacciHeap;
pub use lazy_heap::LazyHeap;
pub use priority_queue::{Priority, PriorityQueue, RadixKey};
pub use radix_heap::RadixHeap;
