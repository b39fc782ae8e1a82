use anyface::{AnyFace, implements, markers::Incomparable};

trait TestCall {
    fn f0(&self) -> i32;
    fn f1(&self, t1: i32) -> i32;
    fn f3(&self, t1: i32, t2: i32, t3: i32) -> i32;
}

impl TestCall for i32 {
    fn f0(&self) -> i32 {
        *self
    }

    fn f1(&self, t1: i32) -> i32 {
        self + t1
    }

    fn f3(&self, t1: i32, t2: i32, t3: i32) -> i32 {
        self + t1 * t2 - t3
    }
}

implements!(dyn TestCall => i32);

type Callable = AnyFace<dyn TestCall, Incomparable>;

#[test]
fn test_call_zero_params() {
    let a = Callable::new(1);
    assert_eq!(a.call(|a| a.f0()), 1);
}

#[test]
fn test_call_method_path() {
    let a = Callable::new(1);
    assert_eq!(a.call(TestCall::f0), 1);
}

#[test]
fn test_call_one_param() {
    let a = Callable::new(1);
    assert_eq!(a.call(|a| a.f1(2)), 3);
}

#[test]
fn test_call_many_params() {
    let a = Callable::new(1);
    assert_eq!(a.call(|a| a.f3(4, 5, 6)), 15);
}
